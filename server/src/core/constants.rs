// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Beacon";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "beacon";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".beacon";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "beacon.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BEACON_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "BEACON_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "BEACON_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BEACON_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "BEACON_DATA_DIR";

/// Environment variable for summary cache capacity
pub const ENV_CACHE_MAX_ENTRIES: &str = "BEACON_CACHE_MAX_ENTRIES";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5180;

/// Default body size limit for API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// SQLite
// =============================================================================

/// SQLite database file name
pub const SQLITE_DB_FILENAME: &str = "beacon.db";

/// Maximum connections in the SQLite pool
pub const SQLITE_MAX_CONNECTIONS: u32 = 8;

/// Busy timeout before a locked database read/write fails
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// Page cache size pragma (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// WAL autocheckpoint threshold in pages
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval between background WAL checkpoints
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Cache
// =============================================================================

/// Default capacity of the in-memory summary cache
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

/// TTL for cached summary responses over historical ranges (seconds)
pub const CACHE_TTL_SUMMARY_SECS: u64 = 300;

// =============================================================================
// Analytics Defaults
// =============================================================================

/// Default number of entries returned by top-content queries
pub const DEFAULT_TOP_LIMIT: u32 = 10;

/// Maximum number of entries a top-content query may request
pub const MAX_TOP_LIMIT: u32 = 100;

/// Maximum number of content ids accepted by comparison queries
pub const MAX_COMPARISON_IDS: usize = 50;

// =============================================================================
// Shutdown
// =============================================================================

/// Seconds to wait for background tasks before forcing shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
