use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::models::route::RouteResult;
use crate::providers::geocoding::GeocodingClient;
use crate::providers::{maps_link, RouteStrategy, TextValue};

/// Matrix stage: a one-to-one distance/duration lookup with live traffic.
/// The same speed adjustment as the driving stage applies to the seconds;
/// the distance and duration text stay as the provider rendered them.
pub struct MatrixStrategy {
    http: reqwest::Client,
    geocoder: Arc<GeocodingClient>,
    base_url: String,
    api_key: String,
    speed_adjustment: f64,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    #[serde(default)]
    status: String,
    duration: Option<TextValue>,
    duration_in_traffic: Option<TextValue>,
    distance: Option<TextValue>,
}

impl MatrixStrategy {
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
impl RouteStrategy for MatrixStrategy {
    fn name(&self) -> &'static str {
        "distance_matrix"
    }

    async fn resolve(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteError> {
        let from = self.geocoder.geocode(origin).await?;
        let to = self.geocoder.geocode(destination).await?;

        let url = format!("{}/maps/api/distancematrix/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("origins", format!("{},{}", from.point.lat, from.point.lng)),
                (
                    "destinations",
                    format!("{},{}", to.point.lat, to.point.lng),
                ),
                ("mode", "driving".to_string()),
                ("departure_time", "now".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::Provider(format!(
                "distance matrix returned {}",
                response.status()
            )));
        }

        let body: MatrixResponse = response.json().await?;
        if body.status != "OK" {
            return Err(RouteError::Provider(format!(
                "distance matrix status {}",
                body.status
            )));
        }

        let element = body
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| RouteError::Provider("distance matrix returned no elements".to_string()))?;

        if element.status != "OK" {
            return Err(RouteError::Provider(format!(
                "distance matrix element status {}",
                element.status
            )));
        }

        let duration_text = element
            .duration
            .as_ref()
            .map(|duration| duration.text.clone())
            .ok_or_else(|| RouteError::Provider("element is missing a duration".to_string()))?;
        let traffic_seconds = element
            .duration_in_traffic
            .as_ref()
            .or(element.duration.as_ref())
            .map(|duration| duration.value)
            .ok_or_else(|| RouteError::Provider("element is missing a duration".to_string()))?;
        let distance = element
            .distance
            .ok_or_else(|| RouteError::Provider("element is missing a distance".to_string()))?;

        if traffic_seconds < 0.0 || distance.value < 0.0 {
            return Err(RouteError::Provider(
                "distance matrix returned negative magnitudes".to_string(),
            ));
        }

        let duration_seconds = (traffic_seconds * self.speed_adjustment).round() as i64;

        Ok(RouteResult {
            distance_text: distance.text,
            distance_meters: distance.value,
            duration_text,
            duration_seconds,
            estimated: false,
            via: "distance matrix".to_string(),
            maps_link: maps_link(&from.formatted_address, &to.formatted_address),
            resolved_origin: from.formatted_address,
            resolved_destination: to.formatted_address,
        })
    }
}
