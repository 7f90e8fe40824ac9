use url::Url;

/// Extracts the network location (host and explicit port) from a URL
///
/// The host is lowercased; a port is kept only when the URL spells one out.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_audit::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/sitemap.xml").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/sitemap.xml").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
