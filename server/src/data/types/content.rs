//! Content registry types

use serde::{Deserialize, Serialize};

/// Minimal content registry entry
///
/// Content itself is owned by the CMS; this table only carries what the
/// analytics layer needs: type filtering and tag similarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRow {
    pub id: i64,
    pub title: String,
    pub content_type: String,
    pub tags: Vec<String>,
}
