//! End-to-end tests of the HTTP API against mocked metadata services.

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hello_cloud::{create_router, AppState, CloudDetector, DetectionCache, DetectorConfig};

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_app(aws: &MockServer, gcp: &MockServer, region: Option<&str>) -> String {
    let config = DetectorConfig {
        aws_base_url: aws.uri(),
        gcp_base_url: gcp.uri(),
        connect_timeout: Duration::from_millis(500),
        read_timeout: Duration::from_millis(500),
        fallback_region: region.map(str::to_string),
    };
    let detector = CloudDetector::from_config(&config).unwrap();
    let app = create_router(AppState::new(DetectionCache::new(detector)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get_json(url: &str) -> Value {
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), 200);
    serde_json::from_str(&response.text().await.unwrap()).unwrap()
}

async fn stub_aws(server: &MockServer) {
    for (field, value) in [
        ("instance-id", "i-0abc123"),
        ("placement/region", "us-east-1"),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/latest/meta-data/{}", field)))
            .respond_with(ResponseTemplate::new(200).set_body_string(value))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_health_on_aws() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;
    stub_aws(&aws).await;
    let base = spawn_app(&aws, &gcp, None).await;

    let body = get_json(&format!("{}/api/health", base)).await;

    assert_eq!(body["status"], "UP");
    assert_eq!(body["cloudProvider"], "AWS");
    assert_eq!(body["region"], "us-east-1");
    assert_eq!(body["instanceId"], "i-0abc123");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_hello_on_aws_reuses_detection() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;
    stub_aws(&aws).await;
    let base = spawn_app(&aws, &gcp, None).await;

    get_json(&format!("{}/api/health", base)).await;
    let body = get_json(&format!("{}/api/hello", base)).await;

    assert_eq!(body["message"], "Hello from AWS!");
    assert_eq!(body["provider"], "AWS");
    assert_eq!(body["region"], "us-east-1");
}

#[tokio::test]
async fn test_hello_with_no_provider() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;
    let base = spawn_app(&aws, &gcp, None).await;

    let body = get_json(&format!("{}/api/hello", base)).await;

    assert_eq!(
        body,
        serde_json::json!({
            "message": "Hello from LOCAL!",
            "provider": "LOCAL",
            "region": "unknown",
            "version": "1.0.0",
        })
    );
}

#[tokio::test]
async fn test_health_with_no_provider() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;
    let base = spawn_app(&aws, &gcp, Some("lab-1")).await;

    let body = get_json(&format!("{}/api/health", base)).await;

    assert_eq!(body["status"], "UP");
    assert_eq!(body["cloudProvider"], "LOCAL");
    assert_eq!(body["region"], "lab-1");
    assert!(body["instanceId"].is_null());
}

#[tokio::test]
async fn test_hello_on_gcp() {
    let aws = MockServer::start().await;
    let gcp = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/computeMetadata/v1/instance/zone"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("projects/123456/zones/us-central1-a"),
        )
        .mount(&gcp)
        .await;
    let base = spawn_app(&aws, &gcp, None).await;

    let body = get_json(&format!("{}/api/hello", base)).await;

    assert_eq!(body["message"], "Hello from GCP!");
    assert_eq!(body["region"], "us-central1");
}
