//! Content analytics service
//!
//! Orchestrates the metric store and the pure engines behind the four
//! reporting operations plus the ingestion write paths.
//!
//! Availability contract: a store failure on any read path is logged and
//! degraded to an empty/default result rather than propagated. These
//! queries back dashboards, where missing data beats a hard failure.
//! Validation failures are real errors; they indicate a caller bug.

use std::sync::Arc;

use chrono::NaiveDate;

use super::error::AnalyticsError;
use crate::core::constants::{MAX_COMPARISON_IDS, MAX_TOP_LIMIT};
use crate::data::traits::AnalyticsRepository;
use crate::data::types::{
    AttributionPathRow, ContentRow, MetricQuery, MetricRecordRow, MetricUpsert, NewAttributionPath,
    PathQuery,
};
use crate::domain::aggregation::{
    self, ComparisonResult, GroupBy, RankMetric, RankedContent, SummaryOutput,
};
use crate::domain::attribution::{self, AttributionModel, AttributionReport};
use crate::domain::recommend::{self, Recommendation, SimilarityMatrix};
use crate::utils::time::day_window;

pub struct ContentAnalyticsService {
    repo: Arc<dyn AnalyticsRepository>,
}

impl ContentAnalyticsService {
    pub fn new(repo: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repo }
    }

    // ==================== Reporting Operations ====================

    /// Attribution report for conversions in `[start_date, end_date]`
    ///
    /// Unknown model names fall back to last-touch. An inverted date range
    /// yields an empty report, not an error.
    pub async fn get_attribution(
        &self,
        content_id: Option<i64>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        model: &str,
    ) -> Result<AttributionReport, AnalyticsError> {
        let model = AttributionModel::parse(model);

        let paths = if start_date > end_date {
            Vec::new()
        } else {
            let (start, end) = day_window(start_date, end_date);
            self.load_paths(&PathQuery {
                start: Some(start),
                end: Some(end),
                ..Default::default()
            })
            .await
        };

        Ok(attribution::attribute(&paths, model, content_id))
    }

    /// Flat or time-bucketed performance summary
    pub async fn get_performance_summary(
        &self,
        content_ids: Option<Vec<i64>>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        group_by: Option<&str>,
    ) -> Result<SummaryOutput, AnalyticsError> {
        if let Some(ids) = &content_ids
            && ids.is_empty()
        {
            return Err(AnalyticsError::validation("content_ids must not be empty"));
        }
        let group_by = match group_by {
            None => None,
            Some(name) => Some(GroupBy::parse(name).ok_or_else(|| {
                AnalyticsError::validation(format!(
                    "unknown group_by '{}' (expected daily, weekly, or monthly)",
                    name
                ))
            })?),
        };

        let records = if start_date > end_date {
            Vec::new()
        } else {
            self.load_metrics(&MetricQuery {
                content_ids,
                start_date: Some(start_date),
                end_date: Some(end_date),
                platform: None,
            })
            .await
        };

        Ok(aggregation::summarize(&records, group_by))
    }

    /// Top-performing content by a single metric
    pub async fn get_top_content(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        metric: &str,
        limit: u32,
        content_type: Option<&str>,
    ) -> Result<Vec<RankedContent>, AnalyticsError> {
        if limit == 0 || limit > MAX_TOP_LIMIT {
            return Err(AnalyticsError::validation(format!(
                "limit must be between 1 and {}",
                MAX_TOP_LIMIT
            )));
        }
        let metric = RankMetric::parse(metric).ok_or_else(|| {
            AnalyticsError::validation(format!("unknown metric '{}'", metric))
        })?;

        if start_date > end_date {
            return Ok(Vec::new());
        }

        let content_ids = match content_type {
            None => None,
            Some(content_type) => {
                let ids = match self.repo.list_content_ids_by_type(content_type).await {
                    Ok(ids) => ids,
                    Err(e) => {
                        tracing::error!(error = %e, "Content type lookup failed; returning empty result");
                        return Ok(Vec::new());
                    }
                };
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                Some(ids)
            }
        };

        let records = self
            .load_metrics(&MetricQuery {
                content_ids,
                start_date: Some(start_date),
                end_date: Some(end_date),
                platform: None,
            })
            .await;

        Ok(aggregation::rank_top(&records, metric, limit as usize))
    }

    /// Side-by-side metric comparison for a set of content ids
    pub async fn get_comparison(
        &self,
        content_ids: &[i64],
        start_date: NaiveDate,
        end_date: NaiveDate,
        metrics: Option<Vec<String>>,
    ) -> Result<ComparisonResult, AnalyticsError> {
        if content_ids.is_empty() {
            return Err(AnalyticsError::validation("content_ids must not be empty"));
        }
        if content_ids.len() > MAX_COMPARISON_IDS {
            return Err(AnalyticsError::validation(format!(
                "at most {} content ids can be compared at once",
                MAX_COMPARISON_IDS
            )));
        }

        let records = if start_date > end_date {
            Vec::new()
        } else {
            self.load_metrics(&MetricQuery {
                content_ids: Some(content_ids.to_vec()),
                start_date: Some(start_date),
                end_date: Some(end_date),
                platform: None,
            })
            .await
        };

        Ok(aggregation::compare(
            &records,
            content_ids,
            metrics.as_deref(),
        ))
    }

    /// Similar-content recommendations weighted by engagement
    pub async fn get_recommendations(
        &self,
        content_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        limit: u32,
    ) -> Result<Vec<Recommendation>, AnalyticsError> {
        if limit == 0 || limit > MAX_TOP_LIMIT {
            return Err(AnalyticsError::validation(format!(
                "limit must be between 1 and {}",
                MAX_TOP_LIMIT
            )));
        }

        let content = match self.repo.list_content().await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, "Content registry query failed; treating as empty");
                Vec::new()
            }
        };

        let records = if start_date > end_date {
            Vec::new()
        } else {
            self.load_metrics(&MetricQuery {
                start_date: Some(start_date),
                end_date: Some(end_date),
                ..Default::default()
            })
            .await
        };

        // Performance signal: engagement per candidate over the window
        let ranked = aggregation::rank_top(&records, RankMetric::Engagement, usize::MAX);
        let candidates: Vec<(i64, f64)> = content
            .iter()
            .map(|c| {
                let performance = ranked
                    .iter()
                    .find(|r| r.content_id == c.id)
                    .map(|r| r.value)
                    .unwrap_or(0.0);
                (c.id, performance)
            })
            .collect();

        let similarity = SimilarityMatrix::from_content(&content);
        Ok(recommend::recommend(
            content_id,
            &candidates,
            &similarity,
            limit as usize,
        )?)
    }

    // ==================== Ingestion Operations ====================

    /// Upsert one metric record with field-level merge
    pub async fn record_metrics(
        &self,
        content_id: i64,
        date: NaiveDate,
        platform: &str,
        upsert: &MetricUpsert,
    ) -> Result<MetricRecordRow, AnalyticsError> {
        if platform.is_empty() {
            return Err(AnalyticsError::validation("platform must not be empty"));
        }
        Ok(self
            .repo
            .upsert_metrics(content_id, date, platform, upsert)
            .await?)
    }

    /// Record one conversion event with its touchpoint history
    pub async fn record_conversion(
        &self,
        new_path: &NewAttributionPath,
    ) -> Result<i64, AnalyticsError> {
        if new_path.path.is_empty() {
            return Err(AnalyticsError::validation(
                "path must contain at least one touchpoint",
            ));
        }
        Ok(self.repo.insert_path(new_path).await?)
    }

    /// Upsert a content registry entry
    pub async fn register_content(&self, content: &ContentRow) -> Result<(), AnalyticsError> {
        if content.title.is_empty() {
            return Err(AnalyticsError::validation("title must not be empty"));
        }
        Ok(self.repo.upsert_content(content).await?)
    }

    // ==================== Internal ====================

    async fn load_metrics(&self, query: &MetricQuery) -> Vec<MetricRecordRow> {
        match self.repo.query_metrics(query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Metric store query failed; returning empty result");
                Vec::new()
            }
        }
    }

    async fn load_paths(&self, query: &PathQuery) -> Vec<AttributionPathRow> {
        match self.repo.query_paths(query).await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!(error = %e, "Attribution path query failed; returning empty result");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::data::error::DataError;
    use crate::data::sqlite::SqliteService;
    use crate::data::types::TouchpointRecord;

    async fn sqlite_service() -> ContentAnalyticsService {
        let pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        ContentAnalyticsService::new(Arc::new(SqliteService::from_pool(pool)))
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    async fn seed_views(service: &ContentAnalyticsService, content_id: i64, d: u32, views: i64) {
        let upsert = MetricUpsert {
            views: Some(views),
            ..Default::default()
        };
        service
            .record_metrics(content_id, day(d), "website", &upsert)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_summary_daily_series_end_to_end() {
        let service = sqlite_service().await;
        seed_views(&service, 1, 1, 100).await;
        seed_views(&service, 1, 2, 150).await;
        seed_views(&service, 1, 3, 200).await;

        let output = service
            .get_performance_summary(Some(vec![1]), day(1), day(3), Some("daily"))
            .await
            .unwrap();

        let SummaryOutput::Series(series) = output else {
            panic!("expected series");
        };
        let views: Vec<i64> = series.iter().map(|b| b.summary.views).collect();
        assert_eq!(views, vec![100, 150, 200]);
    }

    #[tokio::test]
    async fn test_summary_unknown_group_by_is_validation_error() {
        let service = sqlite_service().await;
        let err = service
            .get_performance_summary(None, day(1), day(3), Some("hourly"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_summary_empty_content_ids_is_validation_error() {
        let service = sqlite_service().await;
        let err = service
            .get_performance_summary(Some(vec![]), day(1), day(3), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_summary_inverted_range_is_empty_not_error() {
        let service = sqlite_service().await;
        seed_views(&service, 1, 1, 100).await;

        let output = service
            .get_performance_summary(None, day(3), day(1), None)
            .await
            .unwrap();
        let SummaryOutput::Totals(summary) = output else {
            panic!("expected totals");
        };
        assert_eq!(summary.views, 0);
        assert_eq!(summary.content_count, 0);
    }

    #[tokio::test]
    async fn test_attribution_end_to_end() {
        let service = sqlite_service().await;

        let conversion = NewAttributionPath {
            user_identifier: "user-1".to_string(),
            conversion_id: "conv-1".to_string(),
            conversion_type: "purchase".to_string(),
            conversion_value_cents: 10_000,
            path: vec![
                TouchpointRecord {
                    content_id: 1,
                    timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
                    platform: "website".to_string(),
                },
                TouchpointRecord {
                    content_id: 2,
                    timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
                    platform: "facebook".to_string(),
                },
            ],
            conversion_date: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
        };
        service.record_conversion(&conversion).await.unwrap();

        let report = service
            .get_attribution(None, day(1), day(1), "linear")
            .await
            .unwrap();
        assert_eq!(report.total_conversions, 1);
        assert_eq!(report.content.len(), 2);
        for credit in &report.content {
            assert!((credit.attributed_conversions - 0.5).abs() < 1e-9);
            assert!((credit.attributed_value - 50.0).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_attribution_unknown_model_falls_back() {
        let service = sqlite_service().await;
        let report = service
            .get_attribution(None, day(1), day(2), "time_decay")
            .await
            .unwrap();
        assert_eq!(report.model, AttributionModel::LastTouch);
    }

    #[tokio::test]
    async fn test_record_conversion_empty_path_rejected() {
        let service = sqlite_service().await;
        let conversion = NewAttributionPath {
            user_identifier: "user-1".to_string(),
            conversion_id: "conv-1".to_string(),
            conversion_type: "signup".to_string(),
            conversion_value_cents: 0,
            path: vec![],
            conversion_date: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
        };
        let err = service.record_conversion(&conversion).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_top_content_validates_limit_and_metric() {
        let service = sqlite_service().await;

        let err = service
            .get_top_content(day(1), day(2), "views", 0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));

        let err = service
            .get_top_content(day(1), day(2), "nonsense", 10, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_top_content_filters_by_content_type() {
        let service = sqlite_service().await;
        for (id, content_type) in [(1, "blog_post"), (2, "video")] {
            service
                .register_content(&ContentRow {
                    id,
                    title: format!("Content {}", id),
                    content_type: content_type.to_string(),
                    tags: vec![],
                })
                .await
                .unwrap();
        }
        seed_views(&service, 1, 1, 100).await;
        seed_views(&service, 2, 1, 500).await;

        let ranked = service
            .get_top_content(day(1), day(2), "views", 10, Some("blog_post"))
            .await
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].content_id, 1);
    }

    #[tokio::test]
    async fn test_comparison_requires_content_ids() {
        let service = sqlite_service().await;
        let err = service
            .get_comparison(&[], day(1), day(2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_comparison_end_to_end() {
        let service = sqlite_service().await;
        seed_views(&service, 1, 1, 100).await;
        seed_views(&service, 2, 1, 40).await;

        let result = service
            .get_comparison(&[1, 2], day(1), day(2), Some(vec!["views".to_string()]))
            .await
            .unwrap();
        assert_eq!(result[&1]["views"], 100.0);
        assert_eq!(result[&2]["views"], 40.0);
        assert!(!result[&1].contains_key("revenue"));
    }

    #[tokio::test]
    async fn test_recommendations_unknown_content_is_error() {
        let service = sqlite_service().await;
        let err = service
            .get_recommendations(42, day(1), day(2), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Recommend(_)));
    }

    // A repository whose reads always fail, for the degraded-path contract
    struct FailingRepo;

    #[async_trait]
    impl AnalyticsRepository for FailingRepo {
        async fn query_metrics(
            &self,
            _query: &MetricQuery,
        ) -> Result<Vec<MetricRecordRow>, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn upsert_metrics(
            &self,
            _content_id: i64,
            _date: NaiveDate,
            _platform: &str,
            _upsert: &MetricUpsert,
        ) -> Result<MetricRecordRow, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn query_paths(
            &self,
            _query: &PathQuery,
        ) -> Result<Vec<AttributionPathRow>, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn insert_path(&self, _path: &NewAttributionPath) -> Result<i64, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn get_content(&self, _ids: &[i64]) -> Result<Vec<ContentRow>, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn list_content(&self) -> Result<Vec<ContentRow>, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn list_content_ids_by_type(
            &self,
            _content_type: &str,
        ) -> Result<Vec<i64>, DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }

        async fn upsert_content(&self, _content: &ContentRow) -> Result<(), DataError> {
            Err(DataError::Sqlite(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn test_store_failure_degrades_summary_to_default() {
        let service = ContentAnalyticsService::new(Arc::new(FailingRepo));

        let output = service
            .get_performance_summary(None, day(1), day(2), None)
            .await
            .unwrap();
        let SummaryOutput::Totals(summary) = output else {
            panic!("expected totals");
        };
        assert_eq!(summary.views, 0);
        assert_eq!(summary.content_count, 0);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_attribution_to_empty() {
        let service = ContentAnalyticsService::new(Arc::new(FailingRepo));

        let report = service
            .get_attribution(None, day(1), day(2), "linear")
            .await
            .unwrap();
        assert_eq!(report.total_conversions, 0);
        assert!(report.content.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_on_write() {
        let service = ContentAnalyticsService::new(Arc::new(FailingRepo));
        let upsert = MetricUpsert {
            views: Some(1),
            ..Default::default()
        };
        let err = service
            .record_metrics(1, day(1), "website", &upsert)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Store(_)));
    }
}
