//! Attribution path types
//!
//! An `AttributionPathRow` records one conversion event and the ordered
//! touchpoint history that led to it. Rows are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One touchpoint in a user's journey to conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchpointRecord {
    pub content_id: i64,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

/// One conversion event with its full touchpoint history
///
/// Invariant: `path` is in non-decreasing timestamp order as supplied by the
/// writer; readers trust this order and never re-sort. `first_touch_content_id`
/// and `last_touch_content_id` are writer-maintained denormalizations of
/// `path[0]` / `path[last]` and are authoritative for the single-touch models.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionPathRow {
    pub id: i64,
    pub user_identifier: String,
    /// External conversion identifier; duplicates are tolerated and each row
    /// is counted independently
    pub conversion_id: String,
    pub conversion_type: String,
    /// Minor currency units; zero for non-monetary conversions
    pub conversion_value_cents: i64,
    pub path: Vec<TouchpointRecord>,
    pub first_touch_content_id: Option<i64>,
    pub last_touch_content_id: Option<i64>,
    /// Used for date-range filtering; independent of touchpoint timestamps
    pub conversion_date: DateTime<Utc>,
}

/// Insert payload for a new conversion event
#[derive(Debug, Clone, Deserialize)]
pub struct NewAttributionPath {
    pub user_identifier: String,
    pub conversion_id: String,
    pub conversion_type: String,
    pub conversion_value_cents: i64,
    pub path: Vec<TouchpointRecord>,
    pub conversion_date: DateTime<Utc>,
}

/// Predicate for attribution path reads
///
/// Content scoping is applied by the attribution engine, not the store,
/// since membership lives inside the serialized path.
#[derive(Debug, Clone, Default)]
pub struct PathQuery {
    pub user_identifier: Option<String>,
    /// Inclusive bounds on `conversion_date`
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}
