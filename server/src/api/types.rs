//! Shared API types
//!
//! Common types used across all API endpoints including error handling and
//! query-parameter parsing.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;

use crate::domain::AnalyticsError;
use crate::domain::recommend::RecommendError;

/// Parse a required calendar-date parameter (YYYY-MM-DD)
pub fn parse_date_param(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::bad_request(
            "INVALID_DATE",
            format!("Invalid {}: '{}'. Use YYYY-MM-DD.", name, value),
        )
    })
}

/// Parse an optional comma-separated id list ("1,2,3")
pub fn parse_id_list(value: &Option<String>) -> Result<Option<Vec<i64>>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let mut ids = Vec::new();
            for part in raw.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                let id: i64 = part.parse().map_err(|_| {
                    ApiError::bad_request(
                        "INVALID_ID_LIST",
                        format!("Invalid content id '{}' in list", part),
                    )
                })?;
                ids.push(id);
            }
            Ok(Some(ids))
        }
    }
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a service error to its HTTP shape
    ///
    /// Validation failures and rejected recommendation requests are the
    /// caller's fault (4xx); store failures on write paths are ours (500).
    pub fn from_analytics(e: AnalyticsError) -> Self {
        match e {
            AnalyticsError::Validation(message) => Self::BadRequest {
                code: "VALIDATION".to_string(),
                message,
            },
            AnalyticsError::Recommend(RecommendError::EmptyCandidates) => Self::BadRequest {
                code: "NO_CANDIDATES".to_string(),
                message: RecommendError::EmptyCandidates.to_string(),
            },
            AnalyticsError::Recommend(e @ RecommendError::UnknownContent(_)) => Self::NotFound {
                code: "UNKNOWN_CONTENT".to_string(),
                message: e.to_string(),
            },
            AnalyticsError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                Self::Internal {
                    message: "Database operation failed".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
