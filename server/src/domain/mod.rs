//! Domain logic for content marketing analytics
//!
//! - `aggregation` - Metric summaries, rankings, and comparisons
//! - `analytics` - Service layer orchestrating the store and the engines
//! - `attribution` - Multi-touch attribution credit computation
//! - `recommend` - Similarity-weighted content recommendation scoring

pub mod aggregation;
pub mod analytics;
pub mod attribution;
pub mod recommend;

pub use analytics::{AnalyticsError, ContentAnalyticsService};
pub use attribution::{AttributionModel, AttributionReport};
