//! Application constants for aircheck_fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Schedule API endpoints and formats
pub mod api {
    /// Default broadcast schedule base URL
    pub const BASE_URL: &str = "http://audioapi.orf.at/fm4/json/2.0/broadcasts";

    /// Default playback base URL; the raw stream id is appended verbatim
    pub const LOOP_BASE_URL: &str = "http://loopstream01.apa.at/?channel=fm4&ua=flash&id=";

    /// strftime format for the day path segment of the channel detail endpoint
    pub const DAY_SEGMENT_FORMAT: &str = "%Y%m%d";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "aircheck-fetcher/0.1.0";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 4;
}

/// Pipeline stage wiring
pub mod pipeline {
    /// Capacity of the data channel between adjacent stages.
    ///
    /// A single slot makes the handoff synchronous: a producer suspends
    /// until the consumer has taken the previous item.
    pub const STAGE_CHANNEL_CAPACITY: usize = 1;
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic downloads
    pub const TEMP_FILE_SUFFIX: &str = ".part";
}

/// Logging defaults
pub mod logging {
    /// Log level used when neither CLI flags nor config say otherwise
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use api::{BASE_URL, DAY_SEGMENT_FORMAT, LOOP_BASE_URL};
pub use files::TEMP_FILE_SUFFIX;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use pipeline::STAGE_CHANNEL_CAPACITY;
