//! Sitemap Audit: an on-page SEO auditor driven by XML sitemaps
//!
//! This crate resolves a site's sitemap hierarchy, fetches every listed page
//! with a bounded worker pool, extracts on-page SEO signals, buckets pages by
//! URL path and assembles a multi-sheet spreadsheet report.

pub mod audit;
pub mod categorize;
pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod server;
pub mod sitemap;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No URLs found in sitemap {sitemap_url}")]
    NoUrlsFound { sitemap_url: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Returns true for errors caused by the caller's input rather than by
    /// the auditor itself
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NoUrlsFound { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{AuditOutcome, Auditor};
pub use config::Config;
pub use record::{MetaField, NoindexStatus, PageRecord, PageStatus, RobotsField};
