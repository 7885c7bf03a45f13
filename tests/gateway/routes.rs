use crate::server::GatewayTestServer;
use crate::stub_client::StubClient;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

async fn post_json(url: &str, body: &Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .expect("request should complete");
    let status = response.status();
    let body = response.json().await.expect("response should be json");
    (status, body)
}

#[tokio::test]
async fn health_reports_alive() {
    let server = GatewayTestServer::start(Arc::new(StubClient::replying("unused"))).await;

    let response = reqwest::get(server.url("/health"))
        .await
        .expect("health request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("health body should be json");
    assert_eq!(body, json!({ "status": "alive" }));
}

#[tokio::test]
async fn classify_round_trip_through_gateway() {
    let client = Arc::new(StubClient::replying(
        "```json\n{\"categoria\":\"Improdutivo\",\"resposta\":\"Obrigado pelos votos!\"}\n```",
    ));
    let server = GatewayTestServer::start(client.clone()).await;

    let (status, body) = post_json(
        &server.url("/api/classificar"),
        &json!({ "email_texto": "Feliz ano novo a todos!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "categoria": "Improdutivo", "resposta": "Obrigado pelos votos!" })
    );
    assert_eq!(client.calls(), 1);
    assert!(
        client
            .last_prompt()
            .is_some_and(|prompt| prompt.contains("Feliz ano novo a todos!"))
    );
}

#[tokio::test]
async fn classify_missing_field_is_bad_request() {
    let client = Arc::new(StubClient::replying("unused"));
    let server = GatewayTestServer::start(client.clone()).await;

    let (status, body) = post_json(&server.url("/api/classificar"), &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("email_texto")));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let client = Arc::new(StubClient::replying("unused"));
    let server = GatewayTestServer::start(client.clone()).await;

    for route in ["/api/classificar", "/api/revisar"] {
        let response = reqwest::Client::new()
            .post(server.url(route))
            .header("content-type", "application/json")
            .body("email_texto=oi")
            .send()
            .await
            .expect("request should complete");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{route}");
        let body: Value = response.json().await.expect("error body should be json");
        assert!(body["error"].is_string(), "{route}");

        let response = reqwest::Client::new()
            .post(server.url(route))
            .send()
            .await
            .expect("request should complete");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{route}");
    }
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn classify_invalid_model_output_reports_error_category() {
    let server =
        GatewayTestServer::start(Arc::new(StubClient::replying(r#"{"categoria":"Produtivo"}"#)))
            .await;

    let (status, body) = post_json(
        &server.url("/api/classificar"),
        &json!({ "email_texto": "Preciso do boleto de março." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["categoria"], "Erro");
    assert!(
        body["resposta"]
            .as_str()
            .is_some_and(|r| r.starts_with("Erro ao processar: "))
    );
}

#[tokio::test]
async fn classify_upstream_outage_reports_error_category() {
    let server = GatewayTestServer::start(Arc::new(StubClient::unavailable())).await;

    let (status, body) = post_json(
        &server.url("/api/classificar"),
        &json!({ "email_texto": "Preciso do boleto de março." }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["categoria"], "Erro");
}

#[tokio::test]
async fn revise_round_trip_through_gateway() {
    let client = Arc::new(StubClient::replying("\nPrezados, seguem os documentos.\n"));
    let server = GatewayTestServer::start(client.clone()).await;

    let (status, body) = post_json(
        &server.url("/api/revisar"),
        &json!({ "texto": "ta ai os docs", "acao": "tornar formal" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "texto_revisado": "Prezados, seguem os documentos." })
    );
    let prompt = client.last_prompt().expect("prompt should be recorded");
    assert!(prompt.contains("ta ai os docs"));
    assert!(prompt.contains("tornar formal"));
}

#[tokio::test]
async fn revise_blank_text_is_bad_request() {
    let client = Arc::new(StubClient::replying("unused"));
    let server = GatewayTestServer::start(client.clone()).await;

    let (status, body) = post_json(
        &server.url("/api/revisar"),
        &json!({ "texto": "  ", "acao": "resumir" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("texto")));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn revise_upstream_outage_is_server_error() {
    let server = GatewayTestServer::start(Arc::new(StubClient::unavailable())).await;

    let (status, body) = post_json(
        &server.url("/api/revisar"),
        &json!({ "texto": "oi", "acao": "resumir" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
