pub mod directions;
pub mod estimate;
pub mod geocoding;
pub mod matrix;
pub mod routes_api;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::estimation::address;
use crate::models::route::{RouteQuery, RouteResult};
use crate::observability::metrics::Metrics;
use crate::providers::directions::DirectionsStrategy;
use crate::providers::estimate::GreatCircleStrategy;
use crate::providers::geocoding::GeocodingClient;
use crate::providers::matrix::MatrixStrategy;
use crate::providers::routes_api::RoutesApiStrategy;

/// Advisory attached to every result: the two-wheeler routing mode behind
/// the precise stage is approximate for light vehicles.
pub const TWO_WHEELER_ADVISORY: &str = "routes for light vehicles are approximate";

/// One stage of the fallback chain. A stage that cannot produce both a
/// distance and a duration fails outright; there are no partial successes.
#[async_trait]
pub trait RouteStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteError>;
}

/// Text+value pair as the directions and matrix providers render it.
#[derive(Debug, Deserialize)]
pub(crate) struct TextValue {
    pub text: String,
    pub value: f64,
}

/// Ordered fallback chain: precise two-wheeler routing, generic driving
/// directions, distance matrix, great-circle estimate. Stages run strictly
/// in sequence; each failure is the trigger for the next stage. Only the
/// final stage failing (both addresses ungeocodable) surfaces an error.
pub struct ProviderChain {
    strategies: Vec<Box<dyn RouteStrategy>>,
    metrics: Metrics,
}

impl ProviderChain {
    pub fn from_config(config: &RoutingConfig, metrics: Metrics) -> Result<Self, RouteError> {
        if config.api_key.trim().is_empty() {
            return Err(RouteError::Configuration(
                "routing provider API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| RouteError::Configuration(format!("http client: {err}")))?;

        let geocoder = Arc::new(GeocodingClient::new(http.clone(), config));

        let strategies: Vec<Box<dyn RouteStrategy>> = vec![
            Box::new(RoutesApiStrategy::new(http.clone(), geocoder.clone(), config)),
            Box::new(DirectionsStrategy::new(http.clone(), geocoder.clone(), config)),
            Box::new(MatrixStrategy::new(http, geocoder.clone(), config)),
            Box::new(GreatCircleStrategy::new(geocoder, config)),
        ];

        Ok(Self { strategies, metrics })
    }

    pub async fn resolve(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        for (address, which) in [
            (query.origin.as_str(), "origin"),
            (query.destination.as_str(), "destination"),
        ] {
            if !address::is_routable(address) {
                return Err(RouteError::AddressInvalid(which.to_string()));
            }
        }

        let mut last_err = RouteError::Provider("no routing strategies configured".to_string());

        for (index, strategy) in self.strategies.iter().enumerate() {
            let start = Instant::now();

            match strategy.resolve(&query.origin, &query.destination).await {
                Ok(route) => {
                    self.record(strategy.name(), "success", start);
                    return Ok(route);
                }
                Err(err) => {
                    self.record(strategy.name(), "error", start);
                    if matches!(err, RouteError::GeocodeNotFound(_)) {
                        self.metrics.geocode_failures_total.inc();
                    }
                    if index + 1 < self.strategies.len() {
                        self.metrics
                            .provider_fallbacks_total
                            .with_label_values(&[strategy.name()])
                            .inc();
                        warn!(provider = strategy.name(), error = %err, "route stage failed; falling back");
                    } else {
                        warn!(provider = strategy.name(), error = %err, "final route stage failed");
                    }
                    last_err = err;
                }
            }
        }

        Err(last_err)
    }

    fn record(&self, provider: &str, outcome: &str, start: Instant) {
        self.metrics
            .route_latency_seconds
            .with_label_values(&[provider])
            .observe(start.elapsed().as_secs_f64());
        self.metrics
            .route_lookups_total
            .with_label_values(&[provider, outcome])
            .inc();
    }
}

pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

pub fn format_duration(seconds: i64) -> String {
    let minutes = (seconds as f64 / 60.0).round() as i64;
    if minutes >= 60 {
        format!("{} hr {} mins", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} mins")
    }
}

/// Deep link into the map application for the resolved (not raw) addresses.
/// Always requests driving directions, even for results produced by the
/// two-wheeler stage; map deep links do not carry that mode.
pub fn maps_link(resolved_origin: &str, resolved_destination: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("origin", resolved_origin)
        .append_pair("destination", resolved_destination)
        .append_pair("travelmode", "driving")
        .finish();

    format!("https://www.google.com/maps/dir/?{query}")
}

#[cfg(test)]
mod tests {
    use super::{format_distance, format_duration, maps_link};

    #[test]
    fn distance_is_rendered_in_km_with_one_decimal() {
        assert_eq!(format_distance(12_345.0), "12.3 km");
        assert_eq!(format_distance(900.0), "0.9 km");
    }

    #[test]
    fn short_durations_use_minute_format() {
        assert_eq!(format_duration(45 * 60), "45 mins");
        assert_eq!(format_duration(59 * 60), "59 mins");
    }

    #[test]
    fn durations_of_an_hour_or_more_switch_to_hour_format() {
        assert_eq!(format_duration(60 * 60), "1 hr 0 mins");
        assert_eq!(format_duration(95 * 60), "1 hr 35 mins");
        assert_eq!(format_duration(150 * 60), "2 hr 30 mins");
    }

    #[test]
    fn sub_minute_durations_round_to_nearest_minute() {
        assert_eq!(format_duration(89), "1 mins");
        assert_eq!(format_duration(121), "2 mins");
    }

    #[test]
    fn maps_link_encodes_resolved_addresses_and_driving_mode() {
        let link = maps_link("Sector 10, Navi Mumbai", "Sector 20, Navi Mumbai");

        assert!(link.starts_with("https://www.google.com/maps/dir/?"));
        assert!(link.contains("origin=Sector+10%2C+Navi+Mumbai"));
        assert!(link.contains("destination=Sector+20%2C+Navi+Mumbai"));
        assert!(link.contains("travelmode=driving"));
    }
}
