use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, RouteError};
use crate::models::route::{RouteQuery, RouteResult};
use crate::providers::TWO_WHEELER_ADVISORY;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/routes:calculate", post(calculate_routes))
}

#[derive(Deserialize)]
pub struct CalculateRoutesRequest {
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRoutesResponse {
    pub success: bool,
    pub estimated: bool,
    pub via: String,
    pub resolved_start_address: String,
    pub resolved_end_address: String,
    pub two_wheeler_warning: String,
    pub google_maps_link: String,
    pub legs: Vec<RouteLegPayload>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegPayload {
    pub origin: String,
    pub destination: String,
    pub resolved_start_address: String,
    pub resolved_end_address: String,
    pub distance: String,
    pub duration: String,
    pub duration_value: i64,
    pub distance_value: f64,
    pub estimated: bool,
    pub via: String,
}

async fn calculate_routes(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CalculateRoutesRequest>,
) -> Result<Json<CalculateRoutesResponse>, AppError> {
    let origin = payload
        .origins
        .first()
        .cloned()
        .ok_or_else(|| AppError::BadRequest("origins must contain at least one address".to_string()))?;
    let destination = payload
        .destinations
        .first()
        .cloned()
        .ok_or_else(|| {
            AppError::BadRequest("destinations must contain at least one address".to_string())
        })?;

    let query = RouteQuery {
        origin,
        destination,
    };

    let route = state.chain.resolve(&query).await.map_err(|err| match err {
        RouteError::AddressInvalid(which) => {
            AppError::BadRequest(format!("please provide a valid {which} address"))
        }
        other => AppError::Internal(other.to_string()),
    })?;

    Ok(Json(to_response(query, route)))
}

fn to_response(query: RouteQuery, route: RouteResult) -> CalculateRoutesResponse {
    CalculateRoutesResponse {
        success: true,
        estimated: route.estimated,
        via: route.via.clone(),
        resolved_start_address: route.resolved_origin.clone(),
        resolved_end_address: route.resolved_destination.clone(),
        two_wheeler_warning: TWO_WHEELER_ADVISORY.to_string(),
        google_maps_link: route.maps_link.clone(),
        legs: vec![RouteLegPayload {
            origin: query.origin,
            destination: query.destination,
            resolved_start_address: route.resolved_origin,
            resolved_end_address: route.resolved_destination,
            distance: route.distance_text,
            duration: route.duration_text,
            duration_value: route.duration_seconds,
            distance_value: route.distance_meters,
            estimated: route.estimated,
            via: route.via,
        }],
    }
}
