use crate::models::route::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

#[derive(Debug, Clone, Copy)]
pub struct GreatCircleRoute {
    pub distance_meters: f64,
    pub duration_seconds: i64,
}

/// Synthesizes a road distance and duration from straight-line geometry.
/// The great-circle distance is inflated by `road_factor` to account for
/// road-network indirection, and the duration assumes a constant
/// `average_speed_kmh`, rounded to whole minutes.
pub fn estimate_route(
    a: &GeoPoint,
    b: &GeoPoint,
    road_factor: f64,
    average_speed_kmh: f64,
) -> GreatCircleRoute {
    let road_km = haversine_km(a, b) * road_factor;
    let minutes = (road_km / average_speed_kmh * 60.0).round() as i64;

    GreatCircleRoute {
        distance_meters: road_km * 1000.0,
        duration_seconds: minutes * 60,
    }
}
