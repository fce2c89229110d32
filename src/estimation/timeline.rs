use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::order::DriverOrderRef;

/// Read side of the order store: the single most recent order for a driver,
/// by creation time.
#[async_trait]
pub trait OrderHistory: Send + Sync {
    async fn latest_for_driver(&self, driver_id: Uuid) -> Option<DriverOrderRef>;
}

/// Base timestamp a new order should anchor to, so sequential deliveries
/// for one driver never appear to start before the previous one plausibly
/// finished.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimelineAnchor {
    pub base_time: DateTime<Utc>,
    pub was_adjusted_from_past: bool,
}

pub struct TimelineEstimator {
    past_guard: Duration,
    sequence_buffer: Duration,
}

impl TimelineEstimator {
    pub fn new(past_guard_mins: i64, sequence_buffer_secs: i64) -> Self {
        Self {
            past_guard: Duration::minutes(past_guard_mins),
            sequence_buffer: Duration::seconds(sequence_buffer_secs),
        }
    }

    /// The anchor alone does not make concurrent assignments safe: callers
    /// must hold the per-driver lock across this call and the order insert.
    pub async fn anchor_for(&self, history: &dyn OrderHistory, driver_id: Uuid) -> TimelineAnchor {
        let last = history.latest_for_driver(driver_id).await;
        self.anchor_from(last.as_ref(), Utc::now())
    }

    /// Picks the candidate base from the prior order (completion time, then
    /// estimated delivery time), discards it when it lags wall-clock by more
    /// than the past-guard tolerance, and pads real prior timestamps with
    /// the sequencing buffer.
    pub fn anchor_from(&self, last: Option<&DriverOrderRef>, now: DateTime<Utc>) -> TimelineAnchor {
        let candidate = last.and_then(|order| order.completion_time.or(order.estimated_delivery_time));

        let Some(candidate) = candidate else {
            return TimelineAnchor {
                base_time: now,
                was_adjusted_from_past: false,
            };
        };

        if now - candidate > self.past_guard {
            return TimelineAnchor {
                base_time: now,
                was_adjusted_from_past: true,
            };
        }

        TimelineAnchor {
            base_time: candidate + self.sequence_buffer,
            was_adjusted_from_past: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{TimelineEstimator, DriverOrderRef};

    fn estimator() -> TimelineEstimator {
        TimelineEstimator::new(5, 10)
    }

    fn order_ref(
        completion_mins_from_now: Option<i64>,
        eta_mins_from_now: Option<i64>,
    ) -> (DriverOrderRef, chrono::DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let order = DriverOrderRef {
            completion_time: completion_mins_from_now.map(|m| now + Duration::minutes(m)),
            estimated_delivery_time: eta_mins_from_now.map(|m| now + Duration::minutes(m)),
            created_at: now - Duration::minutes(30),
        };
        (order, now)
    }

    #[test]
    fn no_prior_order_anchors_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let anchor = estimator().anchor_from(None, now);

        assert_eq!(anchor.base_time, now);
        assert!(!anchor.was_adjusted_from_past);
    }

    #[test]
    fn future_completion_time_gets_sequence_buffer() {
        let (order, now) = order_ref(Some(120), None);
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(
            anchor.base_time,
            now + Duration::minutes(120) + Duration::seconds(10)
        );
        assert!(!anchor.was_adjusted_from_past);
    }

    #[test]
    fn completion_time_wins_over_estimated_delivery_time() {
        let (order, now) = order_ref(Some(30), Some(90));
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(
            anchor.base_time,
            now + Duration::minutes(30) + Duration::seconds(10)
        );
    }

    #[test]
    fn estimated_delivery_time_used_when_completion_missing() {
        let (order, now) = order_ref(None, Some(90));
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(
            anchor.base_time,
            now + Duration::minutes(90) + Duration::seconds(10)
        );
    }

    #[test]
    fn stale_completion_time_triggers_past_guard() {
        let (order, now) = order_ref(Some(-60), None);
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(anchor.base_time, now);
        assert!(anchor.was_adjusted_from_past);
    }

    #[test]
    fn slightly_past_completion_within_tolerance_is_kept() {
        let (order, now) = order_ref(Some(-2), None);
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(
            anchor.base_time,
            now - Duration::minutes(2) + Duration::seconds(10)
        );
        assert!(!anchor.was_adjusted_from_past);
    }

    #[test]
    fn order_without_timestamps_anchors_to_now_without_buffer() {
        let (order, now) = order_ref(None, None);
        let anchor = estimator().anchor_from(Some(&order), now);

        assert_eq!(anchor.base_time, now);
        assert!(!anchor.was_adjusted_from_past);
    }
}
