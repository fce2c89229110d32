use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::estimation::eta::{self, COULD_NOT_CALCULATE};
use crate::models::order::DeliveryOrder;
use crate::models::route::{RouteQuery, RouteResult};
use crate::providers::{format_distance, format_duration};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/complete", patch(complete_order))
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub pickup_address: String,
    pub drop_address: String,
    pub driver_id: Option<Uuid>,
    pub manual_distance_km: Option<f64>,
    pub manual_duration_mins: Option<i64>,
}

/// Read-side rendering of an order: the distance and duration strings are
/// derived from the stored magnitudes, falling back to the "could not
/// calculate" sentinel when no estimate (and no manual entry) exists.
#[derive(Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub pickup_address: String,
    pub drop_address: String,
    pub driver_id: Option<Uuid>,
    pub distance: String,
    pub time: String,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub estimated: bool,
    pub via: Option<String>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&DeliveryOrder> for OrderView {
    fn from(order: &DeliveryOrder) -> Self {
        Self {
            id: order.id,
            pickup_address: order.pickup_address.clone(),
            drop_address: order.drop_address.clone(),
            driver_id: order.driver_id,
            distance: order
                .distance_meters
                .map(format_distance)
                .unwrap_or_else(|| COULD_NOT_CALCULATE.to_string()),
            time: order
                .duration_seconds
                .map(format_duration)
                .unwrap_or_else(|| COULD_NOT_CALCULATE.to_string()),
            distance_meters: order.distance_meters,
            duration_seconds: order.duration_seconds,
            estimated: order.estimated,
            via: order.via.clone(),
            estimated_delivery_time: order.estimated_delivery_time,
            completion_time: order.completion_time,
            created_at: order.created_at,
        }
    }
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    if payload.pickup_address.trim().is_empty() || payload.drop_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "pickup and drop addresses are required".to_string(),
        ));
    }

    if let Some(driver_id) = payload.driver_id {
        if !state.drivers.contains_key(&driver_id) {
            return Err(AppError::NotFound(format!("driver {driver_id} not found")));
        }
    }

    // Estimation enriches the order, it never blocks it.
    let query = RouteQuery {
        origin: payload.pickup_address.clone(),
        destination: payload.drop_address.clone(),
    };
    let route = match state.chain.resolve(&query).await {
        Ok(route) => Some(route),
        Err(err) => {
            warn!(error = %err, "route estimation failed; order continues without estimate");
            None
        }
    };

    let order = match payload.driver_id {
        Some(driver_id) => {
            let lock = state.driver_lock(driver_id);
            let _guard = lock.lock().await;

            let anchor = state.timeline.anchor_for(&*state, driver_id).await;
            if anchor.was_adjusted_from_past {
                info!(%driver_id, "prior order timestamp was stale; anchored to wall clock");
            }

            let order = build_order(&payload, route.as_ref(), anchor.base_time);
            state.orders.insert(order.id, order.clone());
            order
        }
        None => {
            let order = build_order(&payload, route.as_ref(), Utc::now());
            state.orders.insert(order.id, order.clone());
            order
        }
    };

    info!(order_id = %order.id, estimated = order.estimated, "order created");
    Ok(Json(OrderView::from(&order)))
}

fn build_order(
    payload: &CreateOrderRequest,
    route: Option<&RouteResult>,
    base_time: DateTime<Utc>,
) -> DeliveryOrder {
    let distance_meters = route
        .map(|r| r.distance_meters)
        .or_else(|| payload.manual_distance_km.map(|km| km * 1000.0));
    let duration_seconds = route
        .map(|r| r.duration_seconds)
        .or_else(|| payload.manual_duration_mins.map(|mins| mins * 60));

    let estimated_delivery_time = match route {
        Some(r) => eta::estimated_delivery_time(&r.duration_text, Some(base_time)),
        None => payload
            .manual_duration_mins
            .filter(|mins| *mins > 0)
            .map(|mins| base_time + Duration::minutes(mins)),
    };

    DeliveryOrder {
        id: Uuid::new_v4(),
        pickup_address: payload.pickup_address.clone(),
        drop_address: payload.drop_address.clone(),
        driver_id: payload.driver_id,
        distance_meters,
        duration_seconds,
        estimated: route.map(|r| r.estimated).unwrap_or(false),
        via: route.map(|r| r.via.clone()),
        estimated_delivery_time,
        completion_time: None,
        created_at: base_time,
    }
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    Ok(Json(OrderView::from(order.value())))
}

async fn complete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>, AppError> {
    let mut order = state
        .orders
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    order.completion_time = Some(Utc::now());

    Ok(Json(OrderView::from(order.value())))
}
