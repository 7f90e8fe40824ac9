//! Configuration module for the auditor
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults the
//! auditor ships with.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Worker pool size: {}", config.crawler.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_categories, CategoryEntry, Config, CrawlerConfig, OutputConfig, ServerConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, config_digest, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
