//! Analytics query routes

pub mod attribution;
pub mod comparison;
pub mod recommendations;
pub mod summary;
pub mod top_content;
pub mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::data::cache::ResponseCache;
use crate::domain::ContentAnalyticsService;

#[derive(Clone)]
pub struct AnalyticsApiState {
    pub service: Arc<ContentAnalyticsService>,
    pub cache: Arc<ResponseCache>,
}

pub fn routes(service: Arc<ContentAnalyticsService>, cache: Arc<ResponseCache>) -> Router<()> {
    let state = AnalyticsApiState { service, cache };

    Router::new()
        .route("/attribution", get(attribution::get_attribution))
        .route("/summary", get(summary::get_summary))
        .route("/top", get(top_content::get_top_content))
        .route("/comparison", get(comparison::get_comparison))
        .route(
            "/recommendations/{content_id}",
            get(recommendations::get_recommendations),
        )
        .with_state(state)
}
