//! Data storage layer
//!
//! Provides the persistent metric store for the application:
//! - `sqlite` - Embedded store for metrics, attribution paths, and content
//! - `cache` - In-memory caching for summary responses
//! - `types` - Shared data types
//! - `traits` - Repository trait the engines depend on
//! - `error` - Unified error type

pub mod cache;
pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export the store service
pub use sqlite::SqliteService;

// Re-export unified error type
pub use error::DataError;

// Re-export repository trait
pub use traits::AnalyticsRepository;

// Re-export shared types for convenient access
pub use types::{
    AttributionPathRow, ContentRow, MetricQuery, MetricRecordRow, MetricUpsert, NewAttributionPath,
    PathQuery, TouchpointRecord,
};
