//! Shared metric record types
//!
//! One `MetricRecordRow` exists per (content_id, date, platform) triple.
//! Counters are additive totals for that day; rate fields are stored as
//! reported upstream and are not recomputed from the counters. Revenue is
//! held in minor currency units (cents) until the presentation boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One performance record per (content_id, date, platform)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecordRow {
    pub content_id: i64,
    /// Day granularity; normalized to midnight UTC on write
    pub date: NaiveDate,
    pub platform: String,

    pub views: i64,
    pub unique_visitors: i64,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub leads_generated: i64,

    /// Platform-reported rates in [0,1]; independent of the raw counters
    pub click_through_rate: f64,
    pub bounce_rate: f64,
    pub conversion_rate: f64,
    pub scroll_depth: f64,

    /// Minor currency units (cents)
    pub revenue_cents: i64,

    /// Opaque breakdown blobs; never interpreted by this subsystem
    pub demographics: Option<serde_json::Value>,
    pub sources: Option<serde_json::Value>,
    pub devices: Option<serde_json::Value>,
}

/// Field-level merge payload for metric ingestion
///
/// Only provided fields overwrite the stored record; everything else is
/// left untouched. First ingestion for a triple creates the row with
/// defaults for the missing fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricUpsert {
    pub views: Option<i64>,
    pub unique_visitors: Option<i64>,
    pub likes: Option<i64>,
    pub shares: Option<i64>,
    pub comments: Option<i64>,
    pub clicks: Option<i64>,
    pub conversions: Option<i64>,
    pub leads_generated: Option<i64>,
    pub click_through_rate: Option<f64>,
    pub bounce_rate: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub scroll_depth: Option<f64>,
    pub revenue_cents: Option<i64>,
    pub demographics: Option<serde_json::Value>,
    pub sources: Option<serde_json::Value>,
    pub devices: Option<serde_json::Value>,
}

/// Predicate for metric record reads
#[derive(Debug, Clone, Default)]
pub struct MetricQuery {
    /// Restrict to these content ids (None = all content)
    pub content_ids: Option<Vec<i64>>,
    /// Inclusive start of the date range
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the date range
    pub end_date: Option<NaiveDate>,
    /// Restrict to a single platform tag
    pub platform: Option<String>,
}
