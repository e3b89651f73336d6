//! Ingestion endpoints (metrics, conversions, content registry)

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, parse_date_param};
use crate::data::types::{ContentRow, MetricUpsert, NewAttributionPath, TouchpointRecord};
use crate::domain::ContentAnalyticsService;

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct IngestApiState {
    pub service: Arc<ContentAnalyticsService>,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngestMetricsRequest {
    pub content_id: i64,
    /// Calendar day the metrics belong to (YYYY-MM-DD)
    #[validate(length(min = 8, max = 10))]
    pub date: String,
    #[validate(length(min = 1, max = 50))]
    pub platform: String,

    #[validate(range(min = 0))]
    pub views: Option<i64>,
    #[validate(range(min = 0))]
    pub unique_visitors: Option<i64>,
    #[validate(range(min = 0))]
    pub likes: Option<i64>,
    #[validate(range(min = 0))]
    pub shares: Option<i64>,
    #[validate(range(min = 0))]
    pub comments: Option<i64>,
    #[validate(range(min = 0))]
    pub clicks: Option<i64>,
    #[validate(range(min = 0))]
    pub conversions: Option<i64>,
    #[validate(range(min = 0))]
    pub leads_generated: Option<i64>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub click_through_rate: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub bounce_rate: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub conversion_rate: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub scroll_depth: Option<f64>,

    /// Minor currency units (cents)
    #[validate(range(min = 0))]
    pub revenue_cents: Option<i64>,

    pub demographics: Option<serde_json::Value>,
    pub sources: Option<serde_json::Value>,
    pub devices: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestMetricsResponse {
    pub content_id: i64,
    pub date: String,
    pub platform: String,
    pub views: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TouchpointDto {
    pub content_id: i64,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngestConversionRequest {
    #[validate(length(min = 1, max = 256))]
    pub user_identifier: String,
    #[validate(length(min = 1, max = 256))]
    pub conversion_id: String,
    #[validate(length(min = 1, max = 100))]
    pub conversion_type: String,
    #[validate(range(min = 0))]
    pub conversion_value_cents: i64,
    /// Touchpoints in non-decreasing timestamp order
    pub path: Vec<TouchpointDto>,
    pub conversion_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestConversionResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterContentRequest {
    pub id: i64,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub content_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(service: Arc<ContentAnalyticsService>) -> Router<()> {
    let state = IngestApiState { service };
    Router::new()
        .route("/api/v1/metrics", post(ingest_metrics))
        .route("/api/v1/conversions", post(ingest_conversion))
        .route("/api/v1/content", post(register_content))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Ingest one metric record (field-level merge upsert)
#[utoipa::path(
    post,
    path = "/api/v1/metrics",
    tag = "ingest",
    request_body = IngestMetricsRequest,
    responses(
        (status = 200, description = "Merged record", body = IngestMetricsResponse)
    )
)]
pub async fn ingest_metrics(
    State(state): State<IngestApiState>,
    ValidatedJson(req): ValidatedJson<IngestMetricsRequest>,
) -> Result<Json<IngestMetricsResponse>, ApiError> {
    let date = parse_date_param("date", &req.date)?;

    let upsert = MetricUpsert {
        views: req.views,
        unique_visitors: req.unique_visitors,
        likes: req.likes,
        shares: req.shares,
        comments: req.comments,
        clicks: req.clicks,
        conversions: req.conversions,
        leads_generated: req.leads_generated,
        click_through_rate: req.click_through_rate,
        bounce_rate: req.bounce_rate,
        conversion_rate: req.conversion_rate,
        scroll_depth: req.scroll_depth,
        revenue_cents: req.revenue_cents,
        demographics: req.demographics,
        sources: req.sources,
        devices: req.devices,
    };

    let merged = state
        .service
        .record_metrics(req.content_id, date, &req.platform, &upsert)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(Json(IngestMetricsResponse {
        content_id: merged.content_id,
        date: merged.date.to_string(),
        platform: merged.platform,
        views: merged.views,
        revenue_cents: merged.revenue_cents,
    }))
}

/// Record one conversion event with its touchpoint history
#[utoipa::path(
    post,
    path = "/api/v1/conversions",
    tag = "ingest",
    request_body = IngestConversionRequest,
    responses(
        (status = 201, description = "Conversion recorded", body = IngestConversionResponse)
    )
)]
pub async fn ingest_conversion(
    State(state): State<IngestApiState>,
    ValidatedJson(req): ValidatedJson<IngestConversionRequest>,
) -> Result<(StatusCode, Json<IngestConversionResponse>), ApiError> {
    let new_path = NewAttributionPath {
        user_identifier: req.user_identifier,
        conversion_id: req.conversion_id,
        conversion_type: req.conversion_type,
        conversion_value_cents: req.conversion_value_cents,
        path: req
            .path
            .into_iter()
            .map(|t| TouchpointRecord {
                content_id: t.content_id,
                timestamp: t.timestamp,
                platform: t.platform,
            })
            .collect(),
        conversion_date: req.conversion_date,
    };

    let id = state
        .service
        .record_conversion(&new_path)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok((StatusCode::CREATED, Json(IngestConversionResponse { id })))
}

/// Register or update a content registry entry
#[utoipa::path(
    post,
    path = "/api/v1/content",
    tag = "ingest",
    request_body = RegisterContentRequest,
    responses(
        (status = 204, description = "Content registered")
    )
)]
pub async fn register_content(
    State(state): State<IngestApiState>,
    ValidatedJson(req): ValidatedJson<RegisterContentRequest>,
) -> Result<StatusCode, ApiError> {
    let content = ContentRow {
        id: req.id,
        title: req.title,
        content_type: req.content_type,
        tags: req.tags,
    };

    state
        .service
        .register_content(&content)
        .await
        .map_err(ApiError::from_analytics)?;

    Ok(StatusCode::NO_CONTENT)
}
