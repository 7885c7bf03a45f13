use crate::server::GatewayTestServer;
use crate::stub_client::StubClient;
use mailroom::config::GatewayConfig;
use reqwest::StatusCode;
use std::sync::Arc;

async fn preflight(url: &str, origin: &str) -> reqwest::Response {
    reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, url)
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("preflight should complete")
}

fn allow_origin(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn default_config_allows_any_origin() {
    let server = GatewayTestServer::start(Arc::new(StubClient::replying("unused"))).await;

    let response = preflight(&server.url("/api/classificar"), "https://app.example.com").await;
    assert!(response.status().is_success());
    assert_eq!(allow_origin(&response), Some("*"));
}

#[tokio::test]
async fn explicit_origin_list_is_enforced() {
    let config = GatewayConfig {
        cors_origins: vec!["https://app.example.com".into()],
        ..GatewayConfig::default()
    };
    let server =
        GatewayTestServer::start_with(Arc::new(StubClient::replying("unused")), config).await;

    let allowed = preflight(&server.url("/api/revisar"), "https://app.example.com").await;
    assert_eq!(allow_origin(&allowed), Some("https://app.example.com"));

    let denied = preflight(&server.url("/api/revisar"), "https://evil.example.com").await;
    assert_eq!(allow_origin(&denied), None);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = GatewayConfig {
        max_body_bytes: 1024,
        ..GatewayConfig::default()
    };
    let client = Arc::new(StubClient::replying("unused"));
    let server = GatewayTestServer::start_with(client.clone(), config).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/classificar"))
        .json(&serde_json::json!({ "email_texto": "a".repeat(4096) }))
        .send()
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(client.calls(), 0);
}
