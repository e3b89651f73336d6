//! Top-content ranking endpoint

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::AnalyticsApiState;
use super::types::RankedContentDto;
use crate::api::types::{ApiError, parse_date_param};
use crate::core::constants::DEFAULT_TOP_LIMIT;

#[derive(Debug, Deserialize)]
pub struct TopContentQuery {
    pub start_date: String,
    pub end_date: String,
    pub metric: String,
    pub limit: Option<u32>,
    pub content_type: Option<String>,
}

/// Top-performing content by a single metric
///
/// All metrics rank descending except bounce_rate, where lower is better.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/top",
    tag = "top-content",
    params(
        ("start_date" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("metric" = String, Query, description = "Metric name, e.g. views, engagement, bounce_rate"),
        ("limit" = Option<u32>, Query, description = "Max entries (default 10)"),
        ("content_type" = Option<String>, Query, description = "Restrict to one content type")
    ),
    responses(
        (status = 200, description = "Ranked content list", body = [RankedContentDto])
    )
)]
pub async fn get_top_content(
    State(state): State<AnalyticsApiState>,
    Query(query): Query<TopContentQuery>,
) -> Result<Json<Vec<RankedContentDto>>, ApiError> {
    let start_date = parse_date_param("start_date", &query.start_date)?;
    let end_date = parse_date_param("end_date", &query.end_date)?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);

    let ranked = state
        .service
        .get_top_content(
            start_date,
            end_date,
            &query.metric,
            limit,
            query.content_type.as_deref(),
        )
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}
