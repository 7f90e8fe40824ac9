use crate::common::{create_test_config, mount_xml, sitemap_index, urlset};
use sitemap_audit::crawler::build_http_client;
use sitemap_audit::sitemap::SitemapResolver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> SitemapResolver {
    let config = create_test_config();
    let client = build_http_client(&config).expect("Failed to build client");
    SitemapResolver::new(client, &config.crawler)
}

#[tokio::test]
async fn test_index_with_shared_url_deduplicates() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap_index.xml",
        sitemap_index(&[
            format!("{}/sitemap-1.xml", base),
            format!("{}/sitemap-2.xml", base),
        ]),
    )
    .await;

    // Three entries per child, one of them listed by both
    mount_xml(
        &mock_server,
        "/sitemap-1.xml",
        urlset(&[
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/shared", base),
        ]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/sitemap-2.xml",
        urlset(&[
            format!("{}/c", base),
            format!("{}/d", base),
            format!("{}/shared", base),
        ]),
    )
    .await;

    let urls = resolver()
        .resolve(&format!("{}/sitemap_index.xml", base))
        .await;

    assert_eq!(urls.len(), 5);
    for page in ["a", "b", "c", "d", "shared"] {
        assert!(urls.contains(&format!("{}/{}", base, page)), "missing {}", page);
    }
}

#[tokio::test]
async fn test_nested_indexes_are_followed() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/root.xml",
        sitemap_index(&[format!("{}/level-2.xml", base)]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/level-2.xml",
        sitemap_index(&[format!("{}/level-3.xml", base)]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/level-3.xml",
        urlset(&[format!("{}/deep", base)]),
    )
    .await;

    let urls = resolver().resolve(&format!("{}/root.xml", base)).await;
    assert_eq!(urls.len(), 1);
    assert!(urls.contains(&format!("{}/deep", base)));
}

#[tokio::test]
async fn test_failed_child_does_not_affect_siblings() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap_index.xml",
        sitemap_index(&[
            format!("{}/missing.xml", base),
            format!("{}/broken.xml", base),
            format!("{}/good.xml", base),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_xml(&mock_server, "/broken.xml", "<urlset><url><loc>".to_string()).await;
    mount_xml(
        &mock_server,
        "/good.xml",
        urlset(&[format!("{}/page", base)]),
    )
    .await;

    let urls = resolver()
        .resolve(&format!("{}/sitemap_index.xml", base))
        .await;
    assert_eq!(urls.len(), 1);
    assert!(urls.contains(&format!("{}/page", base)));
}

#[tokio::test]
async fn test_cyclic_index_terminates() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/a.xml",
        sitemap_index(&[format!("{}/b.xml", base)]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/b.xml",
        sitemap_index(&[format!("{}/a.xml", base), format!("{}/pages.xml", base)]),
    )
    .await;
    mount_xml(
        &mock_server,
        "/pages.xml",
        urlset(&[format!("{}/only", base)]),
    )
    .await;

    let urls = resolver().resolve(&format!("{}/a.xml", base)).await;
    assert_eq!(urls.len(), 1);
}

#[tokio::test]
async fn test_redirected_sitemap_is_followed() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old-sitemap.xml"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/sitemap.xml"))
        .mount(&mock_server)
        .await;
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/moved", base)]),
    )
    .await;

    let urls = resolver().resolve(&format!("{}/old-sitemap.xml", base)).await;
    assert_eq!(urls.len(), 1);
}

#[tokio::test]
async fn test_unreachable_sitemap_yields_nothing() {
    let urls = resolver().resolve("http://127.0.0.1:1/sitemap.xml").await;
    assert!(urls.is_empty());
}
