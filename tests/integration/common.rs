use sitemap_audit::config::{Config, CrawlerConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
pub fn create_test_config() -> Config {
    Config {
        crawler: CrawlerConfig {
            max_workers: 4,
            request_timeout_ms: 2_000,
            retry_attempts: 2,
            retry_delay_ms: 10,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

pub fn urlset(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

pub fn sitemap_index(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

/// Mounts an XML document at `route`
pub async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

/// Mounts an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Simple page with one of each tag
pub fn simple_page(title: &str) -> String {
    format!(
        r#"<html><head>
        <title>{title}</title>
        <meta name="description" content="Description of {title}">
        <link rel="canonical" href="https://example.com/{title}">
        <meta name="robots" content="index, follow">
        </head><body><h1>{title}</h1></body></html>"#
    )
}
