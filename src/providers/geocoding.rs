use serde::Deserialize;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::models::route::{GeoPoint, GeocodedAddress};

/// Forward-geocoding client. A missing or unresolvable address is an
/// ordinary outcome (`GeocodeNotFound`), not an exceptional one; there is
/// no retry here — the chain retries by falling through its stages.
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    geometry: Geometry,
    formatted_address: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GeocodingClient {
    pub fn new(http: reqwest::Client, config: &RoutingConfig) -> Self {
        Self {
            http,
            base_url: config.maps_base_url.clone(),
            api_key: config.api_key.clone(),
            region: config.region_bias.clone(),
        }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodedAddress, RouteError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("address", address),
                ("region", self.region.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RouteError::GeocodeNotFound(address.to_string()));
        }

        let body: GeocodeResponse = response.json().await?;
        if body.status != "OK" {
            return Err(RouteError::GeocodeNotFound(address.to_string()));
        }

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::GeocodeNotFound(address.to_string()))?;

        Ok(GeocodedAddress {
            point: GeoPoint {
                lat: first.geometry.location.lat,
                lng: first.geometry.location.lng,
            },
            formatted_address: first.formatted_address,
        })
    }
}
