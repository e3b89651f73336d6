//! Repository trait for the metric store
//!
//! The engines in `domain` depend on this trait rather than on SQLite
//! directly, so tests can substitute in-memory fakes and a future backend
//! can slot in without touching the algorithmic code.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{
    AttributionPathRow, ContentRow, MetricQuery, MetricRecordRow, MetricUpsert, NewAttributionPath,
    PathQuery,
};

use chrono::NaiveDate;

/// Repository trait for analytics storage (metrics, attribution paths, content)
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    // ==================== Metric Operations ====================

    /// Query metric records by content/date/platform predicate
    async fn query_metrics(&self, query: &MetricQuery) -> Result<Vec<MetricRecordRow>, DataError>;

    /// Upsert one metric record with field-level merge semantics.
    /// Must be atomic at the store layer (no read-then-write).
    async fn upsert_metrics(
        &self,
        content_id: i64,
        date: NaiveDate,
        platform: &str,
        upsert: &MetricUpsert,
    ) -> Result<MetricRecordRow, DataError>;

    // ==================== Attribution Operations ====================

    /// Query attribution paths by user/date predicate
    async fn query_paths(&self, query: &PathQuery) -> Result<Vec<AttributionPathRow>, DataError>;

    /// Insert one conversion event, returning its row id
    async fn insert_path(&self, path: &NewAttributionPath) -> Result<i64, DataError>;

    // ==================== Content Registry Operations ====================

    /// Fetch content entries by id
    async fn get_content(&self, ids: &[i64]) -> Result<Vec<ContentRow>, DataError>;

    /// All content entries
    async fn list_content(&self) -> Result<Vec<ContentRow>, DataError>;

    /// Content ids carrying the given type tag
    async fn list_content_ids_by_type(&self, content_type: &str) -> Result<Vec<i64>, DataError>;

    /// Upsert a content registry entry
    async fn upsert_content(&self, content: &ContentRow) -> Result<(), DataError>;
}
