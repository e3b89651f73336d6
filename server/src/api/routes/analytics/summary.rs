//! Performance summary endpoint

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;

use super::AnalyticsApiState;
use super::types::SummaryResponseDto;
use crate::api::types::{ApiError, parse_date_param, parse_id_list};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Comma-separated content ids; omit for all content
    pub content_ids: Option<String>,
    pub start_date: String,
    pub end_date: String,
    /// daily | weekly | monthly; omit for flat totals
    pub group_by: Option<String>,
}

/// Performance summary over the date range, optionally bucketed
#[utoipa::path(
    get,
    path = "/api/v1/analytics/summary",
    tag = "summary",
    params(
        ("content_ids" = Option<String>, Query, description = "Comma-separated content ids"),
        ("start_date" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("group_by" = Option<String>, Query, description = "daily | weekly | monthly")
    ),
    responses(
        (status = 200, description = "Summary or time series", body = SummaryResponseDto)
    )
)]
pub async fn get_summary(
    State(state): State<AnalyticsApiState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let start_date = parse_date_param("start_date", &query.start_date)?;
    let end_date = parse_date_param("end_date", &query.end_date)?;
    let content_ids = parse_id_list(&query.content_ids)?;

    // Historical ranges are stable; ranges reaching today may still be
    // written to and are never cached
    let cacheable = end_date < Utc::now().date_naive();
    let cache_key = format!(
        "summary:{}:{}:{}:{}",
        query.content_ids.as_deref().unwrap_or("*"),
        start_date,
        end_date,
        query.group_by.as_deref().unwrap_or("none"),
    );

    if cacheable && let Some(cached) = state.cache.get(&cache_key) {
        tracing::trace!(key = %cache_key, "Summary cache hit");
        return Ok(Json(cached));
    }

    let output = state
        .service
        .get_performance_summary(content_ids, start_date, end_date, query.group_by.as_deref())
        .await
        .map_err(ApiError::from_analytics)?;

    let dto = SummaryResponseDto::from_output(output, query.group_by.as_deref());
    let body = serde_json::to_value(&dto)
        .map_err(|e| ApiError::internal(format!("Failed to serialize summary: {}", e)))?;

    if cacheable {
        state.cache.insert(cache_key, body.clone());
    }

    Ok(Json(body))
}
