use crate::common::{create_test_config, mount_page, simple_page};
use sitemap_audit::crawler::{audit_page, build_http_client, FetchPolicy};
use sitemap_audit::record::{FieldKind, MetaField, NoindexStatus, PageStatus, RobotsField};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn policy(timeout_ms: u64) -> FetchPolicy {
    FetchPolicy {
        timeout: Duration::from_millis(timeout_ms),
        attempts: 2,
        retry_delay: Duration::from_millis(10),
        max_redirects: 10,
    }
}

#[tokio::test]
async fn test_page_with_two_h1_tags() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "<html><head><title>Home</title></head><body><h1>Home</h1><h1>Welcome</h1></body></html>",
    )
    .await;

    let client = build_http_client(&create_test_config()).unwrap();
    let url = format!("{}/", mock_server.uri());
    let record = audit_page(&client, &url, &policy(2_000)).await;

    assert_eq!(record.status, PageStatus::Code(200));
    assert_eq!(
        record.metadata.h1.render(FieldKind::H1),
        "⚠ MULTIPLE H1 TAGS (2)\n1. Home\n2. Welcome"
    );
    assert_eq!(record.metadata.title, MetaField::Single("Home".to_string()));
}

#[tokio::test]
async fn test_timeout_on_every_attempt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(simple_page("Slow"))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config()).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let record = audit_page(&client, &url, &policy(200)).await;

    assert_eq!(record.status, PageStatus::Error);
    assert_eq!(record.redirect_count, 0);
    assert_eq!(record.final_url, url);
    assert!(record.metadata.title.is_empty());
    assert!(record.metadata.description.is_empty());
    assert!(record.metadata.h1.is_empty());
    assert!(record.metadata.canonical.is_empty());
    assert_eq!(record.metadata.robots.status(), NoindexStatus::Error);
}

#[tokio::test]
async fn test_retry_recovers_after_first_failure() {
    let mock_server = MockServer::start().await;

    // First request is too slow, the second answers immediately
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(simple_page("Flaky"))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/flaky", &simple_page("Flaky")).await;

    let client = build_http_client(&create_test_config()).unwrap();
    let url = format!("{}/flaky", mock_server.uri());
    let record = audit_page(&client, &url, &policy(300)).await;

    assert_eq!(record.status, PageStatus::Code(200));
    assert_eq!(record.metadata.title, MetaField::Single("Flaky".to_string()));
}

#[tokio::test]
async fn test_redirects_are_counted() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/middle"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/middle"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/new", base)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", &simple_page("New")).await;

    let client = build_http_client(&create_test_config()).unwrap();
    let record = audit_page(&client, &format!("{}/old", base), &policy(2_000)).await;

    assert_eq!(record.status, PageStatus::Code(200));
    assert_eq!(record.redirect_count, 2);
    assert_eq!(record.original_url, format!("{}/old", base));
    assert_eq!(record.final_url, format!("{}/new", base));
    assert_eq!(record.metadata.title, MetaField::Single("New".to_string()));
}

#[tokio::test]
async fn test_non_success_status_is_recorded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("<html><head><title>Not Found</title></head></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_config()).unwrap();
    let record = audit_page(
        &client,
        &format!("{}/gone", mock_server.uri()),
        &policy(2_000),
    )
    .await;

    assert_eq!(record.status, PageStatus::Code(404));
    assert_eq!(
        record.metadata.title,
        MetaField::Single("Not Found".to_string())
    );
}

#[tokio::test]
async fn test_noindex_with_multiple_robots_tags() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/hidden",
        r#"<html><head>
        <meta name="robots" content="index">
        <meta name="ROBOTS" content="NOINDEX, nofollow">
        </head><body></body></html>"#,
    )
    .await;

    let client = build_http_client(&create_test_config()).unwrap();
    let record = audit_page(
        &client,
        &format!("{}/hidden", mock_server.uri()),
        &policy(2_000),
    )
    .await;

    assert_eq!(
        record.metadata.robots,
        RobotsField::Directives {
            noindex: true,
            tag_count: 2
        }
    );
    assert_eq!(
        record.metadata.robots.render(),
        "Yes (⚠ MULTIPLE ROBOTS TAGS (2))"
    );
}
