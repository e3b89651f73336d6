//! Content recommendation endpoint

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::AnalyticsApiState;
use super::types::RecommendationDto;
use crate::api::types::{ApiError, parse_date_param};
use crate::core::constants::DEFAULT_TOP_LIMIT;

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub start_date: String,
    pub end_date: String,
    pub limit: Option<u32>,
}

/// Similar-content recommendations for a reference content id
#[utoipa::path(
    get,
    path = "/api/v1/analytics/recommendations/{content_id}",
    tag = "recommendations",
    params(
        ("content_id" = i64, Path, description = "Reference content id"),
        ("start_date" = String, Query, description = "Performance window start (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Performance window end (YYYY-MM-DD)"),
        ("limit" = Option<u32>, Query, description = "Max recommendations (default 10)")
    ),
    responses(
        (status = 200, description = "Scored recommendations", body = [RecommendationDto]),
        (status = 404, description = "Reference content not in the candidate set")
    )
)]
pub async fn get_recommendations(
    State(state): State<AnalyticsApiState>,
    Path(content_id): Path<i64>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Vec<RecommendationDto>>, ApiError> {
    let start_date = parse_date_param("start_date", &query.start_date)?;
    let end_date = parse_date_param("end_date", &query.end_date)?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);

    let recommendations = state
        .service
        .get_recommendations(content_id, start_date, end_date, limit)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(Json(recommendations.into_iter().map(Into::into).collect()))
}
