//! Attribution report endpoint

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::AnalyticsApiState;
use super::types::AttributionDto;
use crate::api::types::{ApiError, parse_date_param};

#[derive(Debug, Deserialize)]
pub struct AttributionQuery {
    pub content_id: Option<i64>,
    pub start_date: String,
    pub end_date: String,
    /// Attribution model name; unknown values fall back to last_touch
    pub model: Option<String>,
}

/// Multi-touch attribution report for conversions in the date range
#[utoipa::path(
    get,
    path = "/api/v1/analytics/attribution",
    tag = "attribution",
    params(
        ("content_id" = Option<i64>, Query, description = "Only count paths touching this content"),
        ("start_date" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("model" = Option<String>, Query, description = "first_touch | last_touch | linear | position_based")
    ),
    responses(
        (status = 200, description = "Attribution report", body = AttributionDto)
    )
)]
pub async fn get_attribution(
    State(state): State<AnalyticsApiState>,
    Query(query): Query<AttributionQuery>,
) -> Result<Json<AttributionDto>, ApiError> {
    let start_date = parse_date_param("start_date", &query.start_date)?;
    let end_date = parse_date_param("end_date", &query.end_date)?;
    let model = query.model.as_deref().unwrap_or("last_touch");

    let report = state
        .service
        .get_attribution(query.content_id, start_date, end_date, model)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(Json(report.into()))
}
