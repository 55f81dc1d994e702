//! Timestamp parsing and duration formatting

use chrono::{DateTime, NaiveDateTime, Utc};
use pipestat_core::TIME_FORMAT;

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Current time in the timestamp format used by cache files
pub fn now_timestamp() -> String {
    Utc::now().format(TIME_FORMAT).to_string()
}

/// Whole seconds between two timestamps, if both parse and `end` is not before `start`
pub fn elapsed_seconds(start: &str, end: &str) -> Option<u64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    u64::try_from((end - start).num_seconds()).ok()
}

/// Format seconds as `HHh MMm SSs`, omitting leading units that are zero
pub fn format_duration(seconds: u64) -> String {
    let (hours, rest) = (seconds / 3600, seconds % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    if hours > 0 {
        format!("{hours:02}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes:02}m {seconds:02}s")
    } else {
        format!("{seconds:02}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00s");
        assert_eq!(format_duration(5), "05s");
        assert_eq!(format_duration(125), "02m 05s");
        assert_eq!(format_duration(3725), "01h 02m 05s");
        assert_eq!(format_duration(3600), "01h 00m 00s");
    }

    #[test]
    fn test_elapsed_seconds() {
        assert_eq!(
            elapsed_seconds("2021-03-04T10:00:00Z", "2021-03-04T10:00:05Z"),
            Some(5)
        );
        assert_eq!(
            elapsed_seconds("2021-03-04T23:59:00Z", "2021-03-05T00:01:00Z"),
            Some(120)
        );
        assert_eq!(
            elapsed_seconds("2021-03-04T10:00:05Z", "2021-03-04T10:00:00Z"),
            None
        );
        assert_eq!(elapsed_seconds("yesterday", "2021-03-04T10:00:00Z"), None);
    }

    #[test]
    fn test_now_timestamp_parses() {
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }
}
