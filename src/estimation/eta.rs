use chrono::{DateTime, Duration, Utc};

use crate::estimation::duration::parse_minutes;

/// Sentinel shown to users when no chain stage could produce an estimate.
pub const COULD_NOT_CALCULATE: &str = "could not calculate";

/// Turns a duration string and a base timestamp into an absolute delivery
/// estimate. Returns `None` for empty text, the "could not calculate"
/// sentinel, or anything that parses to zero minutes.
pub fn estimated_delivery_time(
    duration_text: &str,
    base_time: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let text = duration_text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(COULD_NOT_CALCULATE) {
        return None;
    }

    let minutes = parse_minutes(text);
    if minutes == 0 {
        return None;
    }

    let base = base_time.unwrap_or_else(Utc::now);
    Some(base + Duration::minutes(minutes))
}
