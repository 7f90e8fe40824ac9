use serde::Deserialize;

/// Main configuration structure for the auditor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryEntry>,
}

impl Config {
    /// Returns the configured category table, or the built-in one when the
    /// configuration declares none
    pub fn effective_categories(&self) -> Vec<CategoryEntry> {
        if self.categories.is_empty() {
            default_categories()
        } else {
            self.categories.clone()
        }
    }
}

/// Fetch pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Size of the fetch+extract worker pool
    #[serde(rename = "max-workers")]
    pub max_workers: u32,

    /// Timeout applied to each HTTP attempt (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Sequential attempts per URL before it is recorded as failed
    #[serde(rename = "retry-attempts")]
    pub retry_attempts: u32,

    /// Pause between two attempts of the same URL (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Redirect hops followed within one attempt
    #[serde(rename = "max-redirects")]
    pub max_redirects: u32,

    /// Maximum nesting of sitemap index documents
    #[serde(rename = "max-sitemap-depth")]
    pub max_sitemap_depth: u32,

    /// Optional cap on the number of pages audited per sitemap
    #[serde(rename = "max-urls")]
    pub max_urls: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: 12,
            request_timeout_ms: 15_000,
            retry_attempts: 2,
            retry_delay_ms: 500,
            max_redirects: 10,
            max_sitemap_depth: 8,
            max_urls: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SitemapAudit".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(rename = "bind-address")]
    pub bind_address: String,

    /// How long a generated report stays downloadable (seconds)
    #[serde(rename = "report-retention-secs")]
    pub report_retention_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            report_retention_secs: 3600,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CLI writes reports into
    pub directory: String,

    /// Sort records by original URL before bucketing, so row order does not
    /// depend on fetch completion order
    #[serde(rename = "stable-order")]
    pub stable_order: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            stable_order: true,
        }
    }
}

/// A named content category matched against URL paths
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    /// Category name, also used as the report sheet name
    pub name: String,

    /// Substring looked up in the page's URL path (e.g. "/blog/")
    pub pattern: String,
}

impl CategoryEntry {
    pub fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Built-in category table, in presentation order
pub fn default_categories() -> Vec<CategoryEntry> {
    vec![
        CategoryEntry::new("Blog", "/blog/"),
        CategoryEntry::new("News", "/news/"),
        CategoryEntry::new("Products", "/products/"),
        CategoryEntry::new("Services", "/services/"),
        CategoryEntry::new("Case Studies", "/case-studies/"),
        CategoryEntry::new("Team", "/team/"),
        CategoryEntry::new("Team Members", "/team-members/"),
        CategoryEntry::new("Careers", "/careers/"),
        CategoryEntry::new("Events", "/events/"),
        CategoryEntry::new("Resources", "/resources/"),
        CategoryEntry::new("Locations", "/locations/"),
        CategoryEntry::new("Documentation", "/docs/"),
    ]
}
