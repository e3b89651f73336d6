//! Time utility functions

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Convert a calendar date to the epoch seconds of its midnight UTC
pub fn date_to_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Convert epoch seconds back to a calendar date (UTC)
pub fn epoch_to_date(secs: i64) -> NaiveDate {
    epoch_to_datetime(secs).date_naive()
}

/// Convert epoch seconds to DateTime<Utc>
pub fn epoch_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_else(|| {
        tracing::warn!(secs, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Inclusive UTC timestamp bounds covering `[start_date, end_date]` whole days
pub fn day_window(start_date: NaiveDate, end_date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    let end = end_date
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
        .and_utc();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_date_epoch_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let secs = date_to_epoch(date);
        assert_eq!(epoch_to_date(secs), date);
    }

    #[test]
    fn test_date_to_epoch_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        // 2024-01-01 00:00:00 UTC = 1704067200 seconds
        assert_eq!(date_to_epoch(date), 1_704_067_200);
    }

    #[test]
    fn test_epoch_to_datetime_invalid_falls_back() {
        let dt = epoch_to_datetime(i64::MAX);
        assert_eq!(dt, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_day_window_inclusive_bounds() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let (lo, hi) = day_window(start, end);
        assert_eq!(lo.hour(), 0);
        assert_eq!(lo.day(), 1);
        assert_eq!(hi.hour(), 23);
        assert_eq!(hi.minute(), 59);
        assert_eq!(hi.day(), 2);
    }
}
