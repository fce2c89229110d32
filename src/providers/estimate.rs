use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::geo;
use crate::models::route::RouteResult;
use crate::providers::geocoding::GeocodingClient;
use crate::providers::{format_distance, format_duration, maps_link, RouteStrategy};

/// Unconditional last resort: no routing call at all, just great-circle
/// geometry inflated for road indirection at an assumed average speed.
/// The only way this stage fails is when an address cannot be geocoded,
/// and that failure is terminal for the whole chain.
pub struct GreatCircleStrategy {
    geocoder: Arc<GeocodingClient>,
    road_factor: f64,
    average_speed_kmh: f64,
}

impl GreatCircleStrategy {
    pub fn new(geocoder: Arc<GeocodingClient>, config: &RoutingConfig) -> Self {
        Self {
            geocoder,
            road_factor: config.road_factor,
            average_speed_kmh: config.average_speed_kmh,
        }
    }
}

#[async_trait]
impl RouteStrategy for GreatCircleStrategy {
    fn name(&self) -> &'static str {
        "great_circle"
    }

    async fn resolve(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteError> {
        let from = self.geocoder.geocode(origin).await?;
        let to = self.geocoder.geocode(destination).await?;

        let route = geo::estimate_route(
            &from.point,
            &to.point,
            self.road_factor,
            self.average_speed_kmh,
        );

        Ok(RouteResult {
            distance_text: format_distance(route.distance_meters),
            distance_meters: route.distance_meters,
            duration_text: format_duration(route.duration_seconds),
            duration_seconds: route.duration_seconds,
            estimated: true,
            via: "estimated route".to_string(),
            maps_link: maps_link(&from.formatted_address, &to.formatted_address),
            resolved_origin: from.formatted_address,
            resolved_destination: to.formatted_address,
        })
    }
}
