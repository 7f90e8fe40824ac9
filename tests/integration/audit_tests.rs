use crate::common::{create_test_config, mount_page, mount_xml, simple_page, urlset};
use sitemap_audit::config::CategoryEntry;
use sitemap_audit::output::XLSX_CONTENT_TYPE;
use sitemap_audit::{AuditError, Auditor};
use wiremock::MockServer;

#[tokio::test]
async fn test_full_audit_single_sitemap() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/", base),
            format!("{}/blog/first-post", base),
            format!("{}/blog/second-post", base),
            format!("{}/team-members/jane", base),
        ]),
    )
    .await;
    mount_page(&mock_server, "/", &simple_page("Home")).await;
    mount_page(&mock_server, "/blog/first-post", &simple_page("First")).await;
    mount_page(
        &mock_server,
        "/blog/second-post",
        "<html><head><title>A</title><title>B</title></head><body></body></html>",
    )
    .await;
    mount_page(&mock_server, "/team-members/jane", &simple_page("Jane")).await;

    let auditor = Auditor::new(create_test_config()).expect("Failed to create auditor");
    let outcome = auditor
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .expect("Audit failed");

    assert_eq!(outcome.total_urls, 4);
    assert_eq!(
        outcome.category_counts,
        vec![
            ("Main".to_string(), 1),
            ("Blog".to_string(), 2),
            ("Team Members".to_string(), 1),
        ]
    );

    assert_eq!(outcome.stats.processed, 4);
    assert_eq!(outcome.stats.errors, 0);
    assert_eq!(outcome.stats.duplicate_titles, 1);
    assert_eq!(outcome.stats.empty_descriptions, 1);
    assert_eq!(outcome.stats.healthy, 3);

    assert!(outcome.report_bytes.starts_with(b"PK"));
    assert_eq!(outcome.content_type, XLSX_CONTENT_TYPE);
    assert!(outcome.filename.starts_with("127_0_0_1:"));
    assert!(outcome.filename.contains("_advanced_seo_analysis_"));
    assert!(outcome.filename.ends_with(".xlsx"));
}

#[tokio::test]
async fn test_all_pages_failing() {
    let mock_server = MockServer::start().await;

    // Nothing listens on port 1, so every page fetch is refused
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[
            "http://127.0.0.1:1/a".to_string(),
            "http://127.0.0.1:1/b".to_string(),
            "http://127.0.0.1:1/blog/c".to_string(),
        ]),
    )
    .await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let outcome = auditor
        .analyze(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(outcome.total_urls, 3);
    assert_eq!(outcome.stats.errors, 3);
    assert_eq!(outcome.stats.healthy, 0);
    assert!(outcome.report_bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_empty_sitemap_is_a_client_error() {
    let mock_server = MockServer::start().await;
    mount_xml(&mock_server, "/sitemap.xml", urlset(&[])).await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let err = auditor
        .analyze(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::NoUrlsFound { .. }));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_max_urls_caps_the_audit() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let pages: Vec<String> = (0..5).map(|i| format!("{}/page-{}", base, i)).collect();
    mount_xml(&mock_server, "/sitemap.xml", urlset(&pages)).await;
    for i in 0..5 {
        mount_page(&mock_server, &format!("/page-{}", i), &simple_page("Page")).await;
    }

    let mut config = create_test_config();
    config.crawler.max_urls = Some(2);

    let auditor = Auditor::new(config).unwrap();
    let outcome = auditor
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert_eq!(outcome.total_urls, 2);
    assert_eq!(outcome.stats.processed, 2);
}

#[tokio::test]
async fn test_custom_categories() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/shop/item", base), format!("{}/blog/post", base)]),
    )
    .await;
    mount_page(&mock_server, "/shop/item", &simple_page("Item")).await;
    mount_page(&mock_server, "/blog/post", &simple_page("Post")).await;

    let mut config = create_test_config();
    config.categories = vec![CategoryEntry::new("Shop", "/shop/")];

    let auditor = Auditor::new(config).unwrap();
    let outcome = auditor
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    // Without a Blog category the post falls back to Main
    assert_eq!(
        outcome.category_counts,
        vec![("Main".to_string(), 1), ("Shop".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_summary_reflects_outcome() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/", base)]),
    )
    .await;
    mount_page(&mock_server, "/", &simple_page("Home")).await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let outcome = auditor
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    let summary = outcome.summary();
    assert_eq!(summary.total_urls, 1);
    assert_eq!(summary.report_filename, outcome.filename);
    assert_eq!(summary.category_counts, outcome.category_counts);
}
