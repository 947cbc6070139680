//! Error types for aircheck_fetcher
//!
//! This module defines error types for all components of the application.
//! Errors carry the context a user needs to act on them: the URL and status
//! code for failed fetches, the destination path for failed downloads.

use std::path::PathBuf;
use thiserror::Error;

/// Schedule API fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or connection failure reaching the API
    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),

    /// API reachable but returned a non-200 response
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body is not valid JSON for the expected shape
    #[error("response from {url} is not valid schedule JSON")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request URL could not be constructed
    #[error("invalid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Download errors, one variant per failure stage
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Destination already exists and force flag not set
    #[error("file already exists: {path}. Use --force to overwrite")]
    DestinationExists { path: PathBuf },

    /// Destination file could not be created
    #[error("failed to create destination file {path}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream request itself failed (transport or non-200 status)
    #[error("stream request for {url} failed")]
    Request {
        url: String,
        #[source]
        source: FetchError,
    },

    /// I/O failure while copying the response body to storage
    #[error("I/O error while writing stream to {path}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("invalid configuration format")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Schedule API error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Download(_) => "download",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            url: "http://example.invalid/broadcasts".to_string(),
            status: 503,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("http://example.invalid/broadcasts"));
    }

    #[test]
    fn test_error_categories() {
        let fetch = AppError::Fetch(FetchError::Status {
            url: "http://example.invalid".to_string(),
            status: 404,
        });
        assert_eq!(fetch.category(), "fetch");

        let download = AppError::Download(DownloadError::DestinationExists {
            path: PathBuf::from("/tmp/out.mp3"),
        });
        assert_eq!(download.category(), "download");
    }
}
