use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::RoutingConfig;
use crate::error::AppError;
use crate::estimation::timeline::{OrderHistory, TimelineEstimator};
use crate::models::driver::Driver;
use crate::models::order::{DeliveryOrder, DriverOrderRef};
use crate::observability::metrics::Metrics;
use crate::providers::ProviderChain;

pub struct AppState {
    pub drivers: DashMap<Uuid, Driver>,
    pub orders: DashMap<Uuid, DeliveryOrder>,
    driver_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    pub chain: ProviderChain,
    pub timeline: TimelineEstimator,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(routing: &RoutingConfig) -> Result<Self, AppError> {
        let metrics = Metrics::new();
        let chain = ProviderChain::from_config(routing, metrics.clone())
            .map_err(|err| AppError::Configuration(err.to_string()))?;

        Ok(Self {
            drivers: DashMap::new(),
            orders: DashMap::new(),
            driver_locks: DashMap::new(),
            chain,
            timeline: TimelineEstimator::new(
                routing.past_guard_mins,
                routing.sequence_buffer_secs,
            ),
            metrics,
        })
    }

    /// Per-driver serialization point: hold this lock across anchor
    /// computation and the order insert, or two concurrent assignments can
    /// anchor to the same stale prior order.
    pub fn driver_lock(&self, driver_id: Uuid) -> Arc<Mutex<()>> {
        self.driver_locks.entry(driver_id).or_default().clone()
    }
}

#[async_trait]
impl OrderHistory for AppState {
    async fn latest_for_driver(&self, driver_id: Uuid) -> Option<DriverOrderRef> {
        self.orders
            .iter()
            .filter(|entry| entry.value().driver_id == Some(driver_id))
            .max_by_key(|entry| entry.value().created_at)
            .map(|entry| DriverOrderRef::from(entry.value()))
    }
}
