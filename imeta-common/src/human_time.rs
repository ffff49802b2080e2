//! Human-readable durations for configuration values and log output
//!
//! Configuration accepts `"24h"`, `"5s"`, `"1500ms"`, `"2d"`, `"30m"` or a
//! bare number of seconds. Formatting picks a unit by magnitude so cache ages
//! and limiter waits read naturally in logs.

use crate::{Error, Result};
use std::time::Duration;

/// Format selection thresholds (seconds)
const SHORT_FORMAT_MAX: u64 = 100;     // < 100s → X.XXs
const LONG_FORMAT_MAX: u64 = 90000;    // < 25h → H:MM:SS
                                        // >= 25h → X.XXd

/// Parse a duration string.
///
/// # Examples
///
/// ```
/// use imeta_common::human_time::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse_duration("24h").unwrap(), Duration::from_secs(86400));
/// assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
/// assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let trimmed = input.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("empty duration".to_string()));
    }

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| Error::InvalidInput(format!("invalid duration '{}'", input)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!("invalid duration '{}'", input)));
    }

    let seconds_per_unit = match unit.trim() {
        "" | "s" | "sec" | "secs" => 1.0,
        "ms" => 0.001,
        "m" | "min" | "mins" => 60.0,
        "h" | "hr" | "hrs" => 3600.0,
        "d" | "day" | "days" => 86400.0,
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown duration unit '{}' in '{}'",
                other, input
            )))
        }
    };

    Duration::try_from_secs_f64(value * seconds_per_unit)
        .map_err(|_| Error::InvalidInput(format!("duration out of range '{}'", input)))
}

/// Format a duration for display.
///
/// ```
/// use imeta_common::human_time::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// assert_eq!(format_duration(Duration::from_secs(3661)), "1:01:01");
/// assert_eq!(format_duration(Duration::from_secs(172800)), "2d");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < SHORT_FORMAT_MAX {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < LONG_FORMAT_MAX {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let rem = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, rem)
    } else {
        let days = (secs as f64 / 86400.0 * 100.0).round() / 100.0;
        if (days - days.floor()).abs() < 0.001 {
            format!("{:.0}d", days)
        } else {
            format!("{:.2}d", days)
        }
    }
}
