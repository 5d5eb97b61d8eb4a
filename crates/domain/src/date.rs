use chrono::prelude::*;
use chrono_tz::Tz;

pub const MINUTE_MILLIS: i64 = 1000 * 60;

/// Formats the wall clock time (`HH:MM`) of a timestamp in millis in the given timezone.
/// Timestamps outside of the range chrono can represent are rendered as `--:--`.
pub fn format_clock(timestamp_millis: i64, tz: &Tz) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.with_timezone(tz).format("%H:%M").to_string(),
        None => "--:--".into(),
    }
}

/// Parses an RFC3339 / ISO8601 timestamp into millis.
///
/// The backend emits both `2021-02-21T09:00:00Z` and `2021-02-21T09:00:00+00:00`,
/// and occasionally naive datetimes which are assumed to be UTC.
pub fn parse_timestamp_millis(datestr: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datestr) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(datestr, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp_millis())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_clock_in_timezone() {
        // Sun Feb 21 2021 09:05:00 UTC
        let ts = 1613898300000;
        assert_eq!(format_clock(ts, &chrono_tz::UTC), "09:05");
        assert_eq!(format_clock(ts, &chrono_tz::Europe::Oslo), "10:05");
    }

    #[test]
    fn parses_backend_timestamps() {
        let expected = Some(1613898300000);
        assert_eq!(parse_timestamp_millis("2021-02-21T09:05:00Z"), expected);
        assert_eq!(parse_timestamp_millis("2021-02-21T09:05:00+00:00"), expected);
        assert_eq!(parse_timestamp_millis("2021-02-21T10:05:00+01:00"), expected);
        assert_eq!(parse_timestamp_millis("2021-02-21T09:05:00"), expected);
        assert_eq!(parse_timestamp_millis("2021-02-21T09:05:00.000"), expected);
        assert_eq!(parse_timestamp_millis("21st of February"), None);
    }
}
