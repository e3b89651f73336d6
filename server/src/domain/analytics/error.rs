//! Analytics service error type

use thiserror::Error;

use crate::data::error::DataError;
use crate::domain::recommend::RecommendError;

/// Error surface of the analytics service
///
/// Read paths swallow store failures (best-effort reporting) and can only
/// fail on caller mistakes; write paths propagate store failures.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Caller bug: bad limit, empty required list, unknown metric name.
    /// Maps to a 4xx at the API boundary.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Recommendation scoring rejected the request
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    /// Store failure on a write path
    #[error("store error: {0}")]
    Store(#[from] DataError),
}

impl AnalyticsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
