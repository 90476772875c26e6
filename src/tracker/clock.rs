//! Elapsed-time display
//!
//! Derived value only: the server owns the real duration.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

use crate::session::ActiveSession;

/// Display shown whenever no session is running
pub const ZERO_ELAPSED: &str = "00:00:00";

/// Parse a server start timestamp
///
/// Accepts RFC 3339 and naive ISO-8601, the latter read as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format as zero-padded HH:MM:SS; hours keep counting past 24
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Elapsed display for a running session at `now`
pub fn elapsed_display(active: Option<&ActiveSession>, now: DateTime<Utc>) -> String {
    active
        .and_then(|session| parse_start_time(&session.start_time))
        .map(|start| format_elapsed(now - start))
        .unwrap_or_else(|| ZERO_ELAPSED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(start_time: &str) -> ActiveSession {
        ActiveSession {
            log_id: "log-1".to_string(),
            start_time: start_time.to_string(),
            process_id: "p1".to_string(),
            process_name: "Sand".to_string(),
        }
    }

    #[test]
    fn test_one_hour_one_minute_one_second() {
        let start = parse_start_time("2025-03-01T08:00:00Z").unwrap();
        let now = start + Duration::seconds(3661);
        assert_eq!(
            elapsed_display(Some(&session("2025-03-01T08:00:00Z")), now),
            "01:01:01"
        );
    }

    #[test]
    fn test_idle_shows_zero() {
        assert_eq!(elapsed_display(None, Utc::now()), "00:00:00");
    }

    #[test]
    fn test_hours_do_not_wrap() {
        assert_eq!(format_elapsed(Duration::seconds(25 * 3600 + 5)), "25:00:05");
    }

    #[test]
    fn test_server_ahead_of_client_clamps_to_zero() {
        assert_eq!(format_elapsed(Duration::seconds(-42)), "00:00:00");
    }

    #[test]
    fn test_parse_backend_timestamps() {
        let with_zone = parse_start_time("2025-03-01T08:00:00.123456Z").unwrap();
        let naive = parse_start_time("2025-03-01T08:00:00.123456").unwrap();
        assert_eq!(with_zone, naive);

        let offset = parse_start_time("2025-03-01T09:00:00+01:00").unwrap();
        assert_eq!(offset, parse_start_time("2025-03-01T08:00:00Z").unwrap());
    }

    #[test]
    fn test_unparseable_start_shows_zero() {
        assert_eq!(elapsed_display(Some(&session("yesterday")), Utc::now()), "00:00:00");
    }
}
