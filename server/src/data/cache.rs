//! In-memory response cache
//!
//! Summary queries over historical ranges are immutable in practice, so a
//! small TTL cache in front of the aggregation path keeps dashboard reloads
//! off the store. Queries whose range reaches into the present are never
//! cached; ingestion may still be mutating those rows.

use std::time::Duration;

use moka::sync::Cache;

use crate::core::constants::CACHE_TTL_SUMMARY_SECS;

/// TTL cache for serialized summary responses, keyed by the query string
pub struct ResponseCache {
    summaries: Cache<String, serde_json::Value>,
}

impl ResponseCache {
    pub fn new(max_entries: u64) -> Self {
        let summaries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(CACHE_TTL_SUMMARY_SECS))
            .build();
        Self { summaries }
    }

    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.summaries.get(key)
    }

    pub fn insert(&self, key: String, value: serde_json::Value) {
        self.summaries.insert(key, value);
    }

    pub fn entry_count(&self) -> u64 {
        self.summaries.run_pending_tasks();
        self.summaries.entry_count()
    }
}
