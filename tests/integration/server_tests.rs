use crate::common::{create_test_config, mount_page, mount_xml, simple_page, urlset};
use serde_json::Value;
use sitemap_audit::server::{router, AppState};
use sitemap_audit::storage::{MemoryReportStore, ReportStore};
use sitemap_audit::Auditor;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Starts the API on an ephemeral port and returns its base URL
async fn spawn_api() -> String {
    let auditor = Auditor::new(create_test_config()).expect("Failed to create auditor");
    let store: Arc<dyn ReportStore> = Arc::new(MemoryReportStore::new(Duration::from_secs(60)));
    let app = router(AppState::new(Arc::new(auditor), store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_analyze(api: &str, body: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/analyze", api))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();

    let status = response.status().as_u16();
    let json = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_index() {
    let api = spawn_api().await;

    let response = reqwest::get(format!("{}/", api)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let json: Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn test_blank_sitemap_url_is_rejected() {
    let api = spawn_api().await;

    let (status, json) = post_analyze(&api, r#"{"sitemap_url": "  "}"#).await;
    assert_eq!(status, 400);
    assert_eq!(json["error"], "Sitemap URL is required");
}

#[tokio::test]
async fn test_missing_body_is_rejected() {
    let api = spawn_api().await;

    let (status, json) = post_analyze(&api, "not json").await;
    assert_eq!(status, 400);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_sitemap_without_urls_is_rejected() {
    let mock_server = MockServer::start().await;
    mount_xml(&mock_server, "/sitemap.xml", urlset(&[])).await;
    let api = spawn_api().await;

    let body = format!(r#"{{"sitemap_url": "{}/sitemap.xml"}}"#, mock_server.uri());
    let (status, json) = post_analyze(&api, &body).await;

    assert_eq!(status, 400);
    assert_eq!(json["error"], "No URLs found in sitemap");
}

#[tokio::test]
async fn test_unknown_download_is_not_found() {
    let api = spawn_api().await;

    let response = reqwest::get(format!("{}/api/download/nothing.xlsx", api))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let json: Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(json["error"], "File not found");
}

#[tokio::test]
async fn test_analyze_then_download() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/", base), format!("{}/blog/post", base)]),
    )
    .await;
    mount_page(&mock_server, "/", &simple_page("Home")).await;
    mount_page(&mock_server, "/blog/post", &simple_page("Post")).await;

    let api = spawn_api().await;
    let body = format!(r#"{{"sitemap_url": "{}/sitemap.xml"}}"#, base);
    let (status, json) = post_analyze(&api, &body).await;

    assert_eq!(status, 200);
    assert_eq!(json["success"], true);
    assert_eq!(json["totalUrls"], 2);
    assert!(json["analysisTime"].as_str().unwrap().ends_with(" seconds"));
    assert_eq!(json["categories"]["Main"], 1);
    assert_eq!(json["categories"]["Blog"], 1);
    assert_eq!(json["stats"]["processed"], 2);
    assert_eq!(json["stats"]["errors"], 0);
    assert_eq!(json["issues"]["duplicateTitles"], 0);
    assert_eq!(json["issues"]["missingTitles"], 0);

    let filename = json["downloadFilename"].as_str().unwrap();
    let response = reqwest::get(format!("{}/api/download/{}", api, filename))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(filename));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"PK"));
}
