use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Output of forward geocoding: a coordinate pair plus the provider's
/// canonical rendering of the address.
#[derive(Debug, Clone)]
pub struct GeocodedAddress {
    pub point: GeoPoint,
    pub formatted_address: String,
}

#[derive(Debug, Clone)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
}

/// One route estimate, produced by whichever chain stage succeeded first.
///
/// `estimated` is true only for the great-circle fallback; every live
/// provider sets it to false.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub distance_text: String,
    pub distance_meters: f64,
    pub duration_text: String,
    pub duration_seconds: i64,
    pub estimated: bool,
    pub via: String,
    pub resolved_origin: String,
    pub resolved_destination: String,
    pub maps_link: String,
}
