use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::models::route::RouteResult;
use crate::providers::geocoding::GeocodingClient;
use crate::providers::{format_distance, format_duration, maps_link, RouteStrategy, TextValue};

/// Generic-driving stage: car directions with live traffic. The traffic
/// duration is reduced by the configured factor to approximate a lighter
/// vehicle's speed advantage over car traffic.
pub struct DirectionsStrategy {
    http: reqwest::Client,
    geocoder: Arc<GeocodingClient>,
    base_url: String,
    api_key: String,
    speed_adjustment: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: Option<TextValue>,
    duration_in_traffic: Option<TextValue>,
    distance: Option<TextValue>,
}

impl DirectionsStrategy {
    pub fn new(
        http: reqwest::Client,
        geocoder: Arc<GeocodingClient>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            http,
            geocoder,
            base_url: config.maps_base_url.clone(),
            api_key: config.api_key.clone(),
            speed_adjustment: config.speed_adjustment,
        }
    }
}

#[async_trait]
impl RouteStrategy for DirectionsStrategy {
    fn name(&self) -> &'static str {
        "directions"
    }

    async fn resolve(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteError> {
        let from = self.geocoder.geocode(origin).await?;
        let to = self.geocoder.geocode(destination).await?;

        let url = format!("{}/maps/api/directions/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", format!("{},{}", from.point.lat, from.point.lng)),
                (
                    "destination",
                    format!("{},{}", to.point.lat, to.point.lng),
                ),
                ("mode", "driving".to_string()),
                ("departure_time", "now".to_string()),
                ("alternatives", "true".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::Provider(format!(
                "directions returned {}",
                response.status()
            )));
        }

        let body: DirectionsResponse = response.json().await?;
        if body.status != "OK" {
            return Err(RouteError::Provider(format!(
                "directions status {}",
                body.status
            )));
        }

        let leg = body
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .ok_or_else(|| RouteError::Provider("directions returned no legs".to_string()))?;

        let traffic_seconds = leg
            .duration_in_traffic
            .or(leg.duration)
            .ok_or_else(|| RouteError::Provider("leg is missing a duration".to_string()))?
            .value;
        let distance_meters = leg
            .distance
            .ok_or_else(|| RouteError::Provider("leg is missing a distance".to_string()))?
            .value;

        if traffic_seconds < 0.0 || distance_meters < 0.0 {
            return Err(RouteError::Provider(
                "directions returned negative magnitudes".to_string(),
            ));
        }

        let duration_seconds = (traffic_seconds * self.speed_adjustment).round() as i64;

        Ok(RouteResult {
            distance_text: format_distance(distance_meters),
            distance_meters,
            duration_text: format_duration(duration_seconds),
            duration_seconds,
            estimated: false,
            via: "driving route".to_string(),
            maps_link: maps_link(&from.formatted_address, &to.formatted_address),
            resolved_origin: from.formatted_address,
            resolved_destination: to.formatted_address,
        })
    }
}
