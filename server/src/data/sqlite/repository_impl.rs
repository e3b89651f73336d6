//! AnalyticsRepository trait implementation for SQLite

use async_trait::async_trait;
use chrono::NaiveDate;

use super::SqliteService;
use super::repositories::{attribution, content, metrics};
use crate::data::error::DataError;
use crate::data::traits::AnalyticsRepository;
use crate::data::types::{
    AttributionPathRow, ContentRow, MetricQuery, MetricRecordRow, MetricUpsert, NewAttributionPath,
    PathQuery,
};

#[async_trait]
impl AnalyticsRepository for SqliteService {
    async fn query_metrics(&self, query: &MetricQuery) -> Result<Vec<MetricRecordRow>, DataError> {
        Ok(metrics::query_metrics(self.pool(), query).await?)
    }

    async fn upsert_metrics(
        &self,
        content_id: i64,
        date: NaiveDate,
        platform: &str,
        upsert: &MetricUpsert,
    ) -> Result<MetricRecordRow, DataError> {
        Ok(metrics::upsert_metrics(self.pool(), content_id, date, platform, upsert).await?)
    }

    async fn query_paths(&self, query: &PathQuery) -> Result<Vec<AttributionPathRow>, DataError> {
        Ok(attribution::query_paths(self.pool(), query).await?)
    }

    async fn insert_path(&self, path: &NewAttributionPath) -> Result<i64, DataError> {
        Ok(attribution::insert_path(self.pool(), path).await?)
    }

    async fn get_content(&self, ids: &[i64]) -> Result<Vec<ContentRow>, DataError> {
        Ok(content::get_content(self.pool(), ids).await?)
    }

    async fn list_content(&self) -> Result<Vec<ContentRow>, DataError> {
        Ok(content::list_content(self.pool()).await?)
    }

    async fn list_content_ids_by_type(&self, content_type: &str) -> Result<Vec<i64>, DataError> {
        Ok(content::list_content_ids_by_type(self.pool(), content_type).await?)
    }

    async fn upsert_content(&self, content_row: &ContentRow) -> Result<(), DataError> {
        Ok(content::upsert_content(self.pool(), content_row).await?)
    }
}
