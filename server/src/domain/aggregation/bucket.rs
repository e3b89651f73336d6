//! Time bucketing for grouped summaries

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time bucket granularity for grouped summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Daily,
    Weekly,
    Monthly,
}

impl GroupBy {
    /// Parse a caller-supplied grouping name; None for unknown input
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Canonical bucket key for a date: the day itself, the Monday of its ISO
/// week, or the first of its month
pub fn bucket_start(date: NaiveDate, group_by: GroupBy) -> NaiveDate {
    match group_by {
        GroupBy::Daily => date,
        GroupBy::Weekly => {
            let days_from_monday = date.weekday().num_days_from_monday() as i64;
            date - Duration::days(days_from_monday)
        }
        GroupBy::Monthly => date.with_day(1).unwrap_or(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(GroupBy::parse("daily"), Some(GroupBy::Daily));
        assert_eq!(GroupBy::parse("weekly"), Some(GroupBy::Weekly));
        assert_eq!(GroupBy::parse("monthly"), Some(GroupBy::Monthly));
        assert_eq!(GroupBy::parse("hourly"), None);
    }

    #[test]
    fn test_daily_bucket_is_identity() {
        assert_eq!(bucket_start(d(2025, 3, 15), GroupBy::Daily), d(2025, 3, 15));
    }

    #[test]
    fn test_weekly_bucket_snaps_to_monday() {
        // 2025-03-15 is a Saturday; its ISO week starts Monday 2025-03-10
        assert_eq!(
            bucket_start(d(2025, 3, 15), GroupBy::Weekly),
            d(2025, 3, 10)
        );
        // A Monday maps to itself
        assert_eq!(
            bucket_start(d(2025, 3, 10), GroupBy::Weekly),
            d(2025, 3, 10)
        );
        // Week spanning a month boundary
        assert_eq!(bucket_start(d(2025, 3, 2), GroupBy::Weekly), d(2025, 2, 24));
    }

    #[test]
    fn test_monthly_bucket_snaps_to_first() {
        assert_eq!(
            bucket_start(d(2025, 3, 31), GroupBy::Monthly),
            d(2025, 3, 1)
        );
        assert_eq!(bucket_start(d(2025, 3, 1), GroupBy::Monthly), d(2025, 3, 1));
    }
}
