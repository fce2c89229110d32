use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::models::route::RouteResult;
use crate::providers::geocoding::GeocodingClient;
use crate::providers::{format_distance, format_duration, maps_link, RouteStrategy};

const FIELD_MASK: &str = "routes.duration,routes.distanceMeters,routes.description";
const FALLBACK_LABEL: &str = "two wheeler route";

/// Precise stage: vehicle-aware routing with live traffic and alternative
/// routes enabled; the provider's primary route wins.
pub struct RoutesApiStrategy {
    http: reqwest::Client,
    geocoder: Arc<GeocodingClient>,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    routing_preference: &'static str,
    compute_alternative_routes: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Waypoint {
    location: WaypointLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WaypointLocation {
    lat_lng: LatLng,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoute {
    duration: Option<String>,
    distance_meters: Option<f64>,
    description: Option<String>,
}

impl RoutesApiStrategy {
    pub fn new(
        http: reqwest::Client,
        geocoder: Arc<GeocodingClient>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            http,
            geocoder,
            base_url: config.routes_base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl RouteStrategy for RoutesApiStrategy {
    fn name(&self) -> &'static str {
        "routes_api"
    }

    async fn resolve(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteError> {
        let from = self.geocoder.geocode(origin).await?;
        let to = self.geocoder.geocode(destination).await?;

        let request = ComputeRoutesRequest {
            origin: Waypoint {
                location: WaypointLocation {
                    lat_lng: LatLng {
                        latitude: from.point.lat,
                        longitude: from.point.lng,
                    },
                },
            },
            destination: Waypoint {
                location: WaypointLocation {
                    lat_lng: LatLng {
                        latitude: to.point.lat,
                        longitude: to.point.lng,
                    },
                },
            },
            travel_mode: "TWO_WHEELER",
            routing_preference: "TRAFFIC_AWARE",
            compute_alternative_routes: true,
        };

        let url = format!("{}/directions/v2:computeRoutes", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::Provider(format!(
                "compute routes returned {}",
                response.status()
            )));
        }

        let body: ComputeRoutesResponse = response.json().await?;
        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::Provider("compute routes returned no routes".to_string()))?;

        let duration_seconds = route
            .duration
            .as_deref()
            .and_then(parse_api_duration)
            .ok_or_else(|| RouteError::Provider("route is missing a duration".to_string()))?;
        let distance_meters = route
            .distance_meters
            .filter(|meters| *meters >= 0.0)
            .ok_or_else(|| RouteError::Provider("route is missing a distance".to_string()))?;

        let via = route
            .description
            .filter(|description| !description.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_LABEL.to_string());

        Ok(RouteResult {
            distance_text: format_distance(distance_meters),
            distance_meters,
            duration_text: format_duration(duration_seconds),
            duration_seconds,
            estimated: false,
            via,
            maps_link: maps_link(&from.formatted_address, &to.formatted_address),
            resolved_origin: from.formatted_address,
            resolved_destination: to.formatted_address,
        })
    }
}

/// The provider renders durations as whole seconds with an "s" suffix.
fn parse_api_duration(raw: &str) -> Option<i64> {
    raw.strip_suffix('s')?.trim().parse().ok().filter(|secs| *secs >= 0)
}

#[cfg(test)]
mod tests {
    use super::parse_api_duration;

    #[test]
    fn parses_seconds_suffix() {
        assert_eq!(parse_api_duration("1234s"), Some(1234));
        assert_eq!(parse_api_duration("0s"), Some(0));
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_api_duration("1234"), None);
        assert_eq!(parse_api_duration("12m"), None);
        assert_eq!(parse_api_duration(""), None);
        assert_eq!(parse_api_duration("-5s"), None);
    }
}
