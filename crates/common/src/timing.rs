//! Millisecond time helpers.
//!
//! Session media carry absolute timestamps in integer milliseconds.
//! Filter graphs take seconds, so every offset written into a graph
//! goes through [`format_secs`] to keep the text stable and minimal.

use chrono::{DateTime, SecondsFormat, Utc};

/// Convert milliseconds to fractional seconds.
pub fn ms_to_secs(ms: i64) -> f64 {
    ms as f64 / 1000.0
}

/// Render a millisecond offset as the shortest decimal seconds value.
///
/// `1500 -> "1.5"`, `2000 -> "2"`, `-250 -> "-0.25"`.
pub fn format_secs(ms: i64) -> String {
    format!("{}", ms_to_secs(ms))
}

/// Render an absolute millisecond timestamp as RFC 3339 (UTC).
///
/// Values outside chrono's representable range fall back to the raw
/// millisecond count.
pub fn format_wall_clock(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("{ms}ms"),
    }
}

/// Human-readable duration such as `1m05.250s`.
pub fn format_duration(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) as f64 / 1000.0;
    if minutes > 0 {
        format!("{sign}{minutes}m{seconds:06.3}s")
    } else {
        format!("{sign}{seconds:.3}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_secs_is_minimal() {
        assert_eq!(format_secs(1500), "1.5");
        assert_eq!(format_secs(2000), "2");
        assert_eq!(format_secs(0), "0");
        assert_eq!(format_secs(-500), "-0.5");
        assert_eq!(format_secs(1234), "1.234");
    }

    #[test]
    fn test_ms_to_secs() {
        assert!((ms_to_secs(2_500) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_format_wall_clock() {
        assert_eq!(format_wall_clock(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            format_wall_clock(1_700_000_000_123),
            "2023-11-14T22:13:20.123Z"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(65_250), "1m05.250s");
        assert_eq!(format_duration(900), "0.900s");
        assert_eq!(format_duration(-1_500), "-1.500s");
    }
}
