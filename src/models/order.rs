use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order record as the estimation core needs it. Only absolute timestamps
/// and raw magnitudes are stored; human-readable distance and duration
/// strings are derived on read so the text can never drift from the numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOrder {
    pub id: Uuid,
    pub pickup_address: String,
    pub drop_address: String,
    pub driver_id: Option<Uuid>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub estimated: bool,
    pub via: Option<String>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The slice of a prior order the timeline estimator consults.
#[derive(Debug, Clone)]
pub struct DriverOrderRef {
    pub completion_time: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&DeliveryOrder> for DriverOrderRef {
    fn from(order: &DeliveryOrder) -> Self {
        Self {
            completion_time: order.completion_time,
            estimated_delivery_time: order.estimated_delivery_time,
            created_at: order.created_at,
        }
    }
}
