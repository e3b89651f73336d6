//! Content comparison endpoint

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::AnalyticsApiState;
use super::types::ComparisonDto;
use crate::api::types::{ApiError, parse_date_param, parse_id_list};

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    /// Comma-separated content ids (required, non-empty)
    pub content_ids: String,
    pub start_date: String,
    pub end_date: String,
    /// Comma-separated metric names to include; omit for all
    pub metrics: Option<String>,
}

/// Side-by-side metric comparison for a set of content ids
#[utoipa::path(
    get,
    path = "/api/v1/analytics/comparison",
    tag = "comparison",
    params(
        ("content_ids" = String, Query, description = "Comma-separated content ids"),
        ("start_date" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("metrics" = Option<String>, Query, description = "Comma-separated metric allow-list")
    ),
    responses(
        (status = 200, description = "Per-content metric values", body = ComparisonDto)
    )
)]
pub async fn get_comparison(
    State(state): State<AnalyticsApiState>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<ComparisonDto>, ApiError> {
    let start_date = parse_date_param("start_date", &query.start_date)?;
    let end_date = parse_date_param("end_date", &query.end_date)?;
    let content_ids = parse_id_list(&Some(query.content_ids))?.unwrap_or_default();
    let metrics: Option<Vec<String>> = query.metrics.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });

    let result = state
        .service
        .get_comparison(&content_ids, start_date, end_date, metrics)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(Json(result.into()))
}
