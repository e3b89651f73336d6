//! SQLite schema definitions
//!
//! Initial schema with all tables. No migrations needed for first version.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Content registry (analytics-facing subset of the CMS content model)
-- =============================================================================
CREATE TABLE IF NOT EXISTS content (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL CHECK(length(title) >= 1 AND length(title) <= 500),
    content_type TEXT NOT NULL CHECK(length(content_type) >= 1 AND length(content_type) <= 50),
    tags TEXT NOT NULL DEFAULT '[]',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_content_type ON content(content_type);

-- =============================================================================
-- 2. Content metrics: one row per (content_id, date, platform)
-- =============================================================================
CREATE TABLE IF NOT EXISTS content_metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content_id INTEGER NOT NULL,
    -- Midnight UTC of the calendar day, epoch seconds
    date INTEGER NOT NULL,
    platform TEXT NOT NULL DEFAULT 'website',

    views INTEGER NOT NULL DEFAULT 0 CHECK(views >= 0),
    unique_visitors INTEGER NOT NULL DEFAULT 0 CHECK(unique_visitors >= 0),
    likes INTEGER NOT NULL DEFAULT 0 CHECK(likes >= 0),
    shares INTEGER NOT NULL DEFAULT 0 CHECK(shares >= 0),
    comments INTEGER NOT NULL DEFAULT 0 CHECK(comments >= 0),
    clicks INTEGER NOT NULL DEFAULT 0 CHECK(clicks >= 0),
    conversions INTEGER NOT NULL DEFAULT 0 CHECK(conversions >= 0),
    leads_generated INTEGER NOT NULL DEFAULT 0 CHECK(leads_generated >= 0),

    click_through_rate REAL NOT NULL DEFAULT 0.0,
    bounce_rate REAL NOT NULL DEFAULT 0.0,
    conversion_rate REAL NOT NULL DEFAULT 0.0,
    scroll_depth REAL NOT NULL DEFAULT 0.0,

    -- Minor currency units (cents)
    revenue_cents INTEGER NOT NULL DEFAULT 0,

    -- Opaque JSON breakdowns, never interpreted here
    demographics TEXT,
    sources TEXT,
    devices TEXT,

    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,

    UNIQUE(content_id, date, platform)
);

CREATE INDEX IF NOT EXISTS idx_content_metrics_content_date ON content_metrics(content_id, date);
CREATE INDEX IF NOT EXISTS idx_content_metrics_date ON content_metrics(date);

-- =============================================================================
-- 3. Attribution paths: one immutable row per conversion event
-- =============================================================================
CREATE TABLE IF NOT EXISTS attribution_paths (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_identifier TEXT NOT NULL,
    conversion_id TEXT NOT NULL,
    conversion_type TEXT NOT NULL,
    -- Minor currency units; zero for non-monetary conversions
    conversion_value_cents INTEGER NOT NULL DEFAULT 0,
    -- Ordered touchpoint list, JSON array of {content_id, timestamp, platform}
    path TEXT NOT NULL,
    first_touch_content_id INTEGER,
    last_touch_content_id INTEGER,
    -- Epoch seconds of the conversion event
    conversion_date INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_attribution_paths_date ON attribution_paths(conversion_date);
CREATE INDEX IF NOT EXISTS idx_attribution_paths_user ON attribution_paths(user_identifier);
"#;
