use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*([a-zA-Z]+)").expect("valid duration pattern"));

/// Extracts a minute count from a free-text duration such as "45 mins" or
/// "2 hours". Only the first number+unit pair is honored, so
/// "1 hour 30 mins" parses as 60. Unknown units fall back to minutes.
/// Unparseable text yields 0, which callers treat as "no estimate", never
/// as a real zero-duration trip.
pub fn parse_minutes(text: &str) -> i64 {
    let Some(caps) = DURATION_PATTERN.captures(text) else {
        return 0;
    };

    let value: i64 = caps[1].parse().unwrap_or(0);
    let unit = caps[2].to_lowercase();

    if unit.starts_with("hour") || unit.starts_with("hr") {
        value * 60
    } else if unit.starts_with("day") {
        value * 1440
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::parse_minutes;

    #[test]
    fn parses_plain_minutes() {
        assert_eq!(parse_minutes("45 mins"), 45);
        assert_eq!(parse_minutes("1 min"), 1);
        assert_eq!(parse_minutes("12 minutes"), 12);
    }

    #[test]
    fn parses_hours_to_minutes() {
        assert_eq!(parse_minutes("2 hours"), 120);
        assert_eq!(parse_minutes("1 hr 5 mins"), 60);
    }

    #[test]
    fn parses_days_to_minutes() {
        assert_eq!(parse_minutes("1 day"), 1440);
    }

    #[test]
    fn compound_strings_only_honor_leading_pair() {
        assert_eq!(parse_minutes("1 hour 30 mins"), 60);
    }

    #[test]
    fn unknown_unit_defaults_to_minutes() {
        assert_eq!(parse_minutes("30 ticks"), 30);
    }

    #[test]
    fn unparseable_text_returns_zero() {
        assert_eq!(parse_minutes(""), 0);
        assert_eq!(parse_minutes("N/A"), 0);
        assert_eq!(parse_minutes("soon"), 0);
    }
}
