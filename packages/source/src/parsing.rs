//! Shared field-coercion utilities for raw crash records.
//!
//! Every function here returns `Option`: a value that fails coercion becomes
//! an explicit missing sentinel, never a default and never an error. The
//! only dataset-wide failure (`Year`) is handled in [`crate::normalize`].

use chrono::NaiveTime;
use crash_stats_crash_models::Month;

/// Parses a strict `HH:MM` clock time. Returns `None` for anything that
/// does not match the pattern, including out-of-range components.
#[must_use]
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Parses a month number into the closed 1-12 categorical domain. Values
/// outside the domain are rejected, not clamped.
#[must_use]
pub fn parse_month(s: &str) -> Option<Month> {
    s.trim().parse::<u8>().ok().and_then(Month::from_number)
}

/// Parses a year as a plain integer.
#[must_use]
pub fn parse_year(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

/// Parses a numeric age. Non-finite results count as missing.
#[must_use]
pub fn parse_age(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|age| age.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_clock_time() {
        let time = parse_clock_time("08:30").unwrap();
        assert_eq!(time.to_string(), "08:30:00");
    }

    #[test]
    fn rejects_out_of_range_clock_time() {
        assert!(parse_clock_time("25:99").is_none());
    }

    #[test]
    fn rejects_non_time_text() {
        assert!(parse_clock_time("abc").is_none());
        assert!(parse_clock_time("08:30:00").is_none());
        assert!(parse_clock_time("").is_none());
    }

    #[test]
    fn month_domain_is_closed() {
        assert_eq!(parse_month("1"), Some(Month::January));
        assert_eq!(parse_month("12"), Some(Month::December));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("July"), None);
    }

    #[test]
    fn parses_year_integers() {
        assert_eq!(parse_year("1989"), Some(1989));
        assert_eq!(parse_year(" 2021 "), Some(2021));
        assert_eq!(parse_year("twenty"), None);
        assert_eq!(parse_year("2021.0"), None);
    }

    #[test]
    fn parses_age_floats() {
        assert_eq!(parse_age("42"), Some(42.0));
        assert_eq!(parse_age("17.5"), Some(17.5));
        assert_eq!(parse_age("unknown"), None);
        assert_eq!(parse_age("NaN"), None);
    }
}
