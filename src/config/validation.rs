use crate::config::types::{
    CategoryEntry, Config, CrawlerConfig, ServerConfig, UserAgentConfig,
};
use crate::categorize::MAIN_CATEGORY;
use crate::ConfigError;
use std::collections::HashSet;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    if config.retry_attempts < 1 || config.retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "retry_attempts must be between 1 and 10, got {}",
            config.retry_attempts
        )));
    }

    if config.max_sitemap_depth < 1 {
        return Err(ConfigError::Validation(
            "max_sitemap_depth must be >= 1".to_string(),
        ));
    }

    if config.max_urls == Some(0) {
        return Err(ConfigError::Validation(
            "max_urls must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address '{}' is not a socket address: {}",
            config.bind_address, e
        ))
    })?;

    if config.report_retention_secs == 0 {
        return Err(ConfigError::Validation(
            "report_retention_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the category table: names and patterns must be unique and
/// non-empty, and no category may shadow the catch-all bucket
fn validate_categories(categories: &[CategoryEntry]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    let mut patterns = HashSet::new();

    for entry in categories {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidCategory(
                "category name cannot be empty".to_string(),
            ));
        }

        if name.eq_ignore_ascii_case(MAIN_CATEGORY) {
            return Err(ConfigError::InvalidCategory(format!(
                "'{}' is reserved for the catch-all category",
                MAIN_CATEGORY
            )));
        }

        if entry.pattern.is_empty() {
            return Err(ConfigError::InvalidCategory(format!(
                "category '{}' has an empty pattern",
                name
            )));
        }

        if !names.insert(name.to_lowercase()) {
            return Err(ConfigError::InvalidCategory(format!(
                "duplicate category name '{}'",
                name
            )));
        }

        if !patterns.insert(entry.pattern.as_str()) {
            return Err(ConfigError::InvalidCategory(format!(
                "duplicate category pattern '{}'",
                entry.pattern
            )));
        }
    }

    Ok(())
}
