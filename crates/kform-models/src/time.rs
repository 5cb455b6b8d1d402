//! Playback time formatting and parsing.
//!
//! Formation times are seconds from video start (`f64`). The viewer shows
//! them as `m:ss`; the editor accepts `ss`, `m:ss` or `h:mm:ss` input.

use thiserror::Error;

/// Upper bound for authored times (24 hours in seconds).
pub const MAX_TIME_SECS: f64 = 86400.0;

/// Time parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeParseError {
    #[error("time cannot be empty")]
    Empty,
    #[error("time cannot be negative")]
    Negative,
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
    #[error("invalid time format '{0}', use ss, m:ss or h:mm:ss")]
    InvalidFormat(String),
    #[error("time exceeds maximum of {0} seconds")]
    TooLarge(f64),
}

/// Format seconds as `m:ss`.
///
/// Minutes are not wrapped into hours. Negative or non-finite input formats
/// as `0:00`.
///
/// # Examples
/// ```
/// use kform_models::time::format_time;
/// assert_eq!(format_time(0.0), "0:00");
/// assert_eq!(format_time(75.9), "1:15");
/// assert_eq!(format_time(3725.0), "62:05");
/// ```
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

/// Parse `ss`, `m:ss` or `h:mm:ss` (fractional seconds allowed) into seconds.
pub fn parse_time(input: &str) -> Result<f64, TimeParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let parts: Vec<&str> = input.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => (0.0, 0.0, component("seconds", s)?),
        [m, s] => (0.0, component("minutes", m)?, component("seconds", s)?),
        [h, m, s] => (
            component("hours", h)?,
            component("minutes", m)?,
            component("seconds", s)?,
        ),
        _ => return Err(TimeParseError::InvalidFormat(input.to_string())),
    };

    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    if total > MAX_TIME_SECS {
        return Err(TimeParseError::TooLarge(MAX_TIME_SECS));
    }
    Ok(total)
}

fn component(name: &'static str, raw: &str) -> Result<f64, TimeParseError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TimeParseError::InvalidValue(name, raw.to_string()))?;
    if !value.is_finite() {
        return Err(TimeParseError::InvalidValue(name, raw.to_string()));
    }
    if value < 0.0 {
        return Err(TimeParseError::Negative);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(125.4), "2:05");
    }

    #[test]
    fn test_format_time_degenerate_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("42").unwrap(), 42.0);
        assert_eq!(parse_time("1:30").unwrap(), 90.0);
        assert_eq!(parse_time("1:00:05").unwrap(), 3605.0);
        assert!((parse_time("0:12.5").unwrap() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_time_errors() {
        assert_eq!(parse_time(""), Err(TimeParseError::Empty));
        assert_eq!(parse_time("-5"), Err(TimeParseError::Negative));
        assert!(matches!(parse_time("abc"), Err(TimeParseError::InvalidValue("seconds", _))));
        assert!(matches!(parse_time("1:2:3:4"), Err(TimeParseError::InvalidFormat(_))));
        assert!(matches!(parse_time("NaN"), Err(TimeParseError::InvalidValue(_, _))));
        assert!(matches!(parse_time("25:00:00"), Err(TimeParseError::TooLarge(_))));
    }
}
