//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file.

// ============================================================================
// Fixture Catalog
// ============================================================================

/// Strongly happy and hopeful, highly rated
pub const SUNSHINE_TITLE: &str = "Sunshine Parade";

/// Strongly sad and thoughtful
pub const RAIN_TITLE: &str = "Quiet Rain";

/// Calm and thoughtful, highly rated
pub const STILL_WATERS_TITLE: &str = "Still Waters";

/// Angry and excited
pub const STORM_TITLE: &str = "Storm Front";

/// Prefix of the generated happy-leaning filler titles
pub const FILLER_PREFIX: &str = "Bright Day";

/// Number of generated filler titles
pub const FILLER_COUNT: usize = 60;

/// Named titles written to the fixture, excluding filler
pub const NAMED_TITLE_COUNT: usize = 6;

/// Valid titles in the fixture; two more malformed rows are skipped on load
pub const VALID_TITLE_COUNT: usize = NAMED_TITLE_COUNT + FILLER_COUNT;

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to accept requests
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval while waiting for the server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
