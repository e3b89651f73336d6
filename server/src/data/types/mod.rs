//! Shared data types for the store layer

pub mod attribution;
pub mod content;
pub mod metrics;

pub use attribution::{AttributionPathRow, NewAttributionPath, PathQuery, TouchpointRecord};
pub use content::ContentRow;
pub use metrics::{MetricQuery, MetricRecordRow, MetricUpsert};
