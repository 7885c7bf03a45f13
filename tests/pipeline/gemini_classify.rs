use crate::server::GatewayTestServer;
use mailroom::llm::GeminiClient;
use mailroom::triage::{Category, ClassificationRequest, ClassificationService};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn mock_gemini(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn gemini_client(upstream: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-2.5-flash").with_base_url(&upstream.uri())
}

#[tokio::test]
async fn service_classifies_fenced_gemini_reply() {
    let upstream = mock_gemini(
        200,
        gemini_text(
            "```json\n{\"categoria\": \"Produtivo\", \"resposta\": \"Olá! Vamos verificar o status do seu chamado.\"}\n```",
        ),
    )
    .await;

    let service = ClassificationService::new(Arc::new(gemini_client(&upstream)));
    let result = service
        .classify(&ClassificationRequest::new(
            "Bom dia, poderiam informar o status do chamado 4821?",
        ))
        .await
        .expect("classification should succeed");

    assert_eq!(result.category, Category::Productive);
    assert_eq!(
        result.suggested_reply,
        "Olá! Vamos verificar o status do seu chamado."
    );

    let requests = upstream
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).expect("request body is json");
    let prompt = sent["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text should be present");
    assert!(prompt.contains("status do chamado 4821"));
}

#[tokio::test]
async fn gateway_classifies_through_gemini() {
    let upstream = mock_gemini(
        200,
        gemini_text(r#"{"categoria":"Improdutivo","resposta":"Obrigado, igualmente!"}"#),
    )
    .await;
    let server = GatewayTestServer::start(Arc::new(gemini_client(&upstream))).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/classificar"))
        .json(&json!({ "email_texto": "Boas festas para toda a equipe!" }))
        .send()
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body should be json");
    assert_eq!(
        body,
        json!({ "categoria": "Improdutivo", "resposta": "Obrigado, igualmente!" })
    );
}

#[tokio::test]
async fn gateway_reports_gemini_failure_without_leaking_key() {
    let upstream = mock_gemini(
        403,
        json!({ "error": { "code": 403, "message": "API key AIzaSyLeaked0000 was rejected" } }),
    )
    .await;
    let server = GatewayTestServer::start(Arc::new(gemini_client(&upstream))).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/classificar"))
        .json(&json!({ "email_texto": "Preciso de suporte" }))
        .send()
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("body should be json");
    assert_eq!(body["categoria"], "Erro");
    let reply = body["resposta"].as_str().expect("reply should be a string");
    assert!(reply.contains("403"));
    assert!(!reply.contains("AIzaSyLeaked0000"));
}

#[tokio::test]
async fn gateway_revises_through_gemini() {
    let upstream = mock_gemini(200, gemini_text("  Prezado cliente, agradecemos o contato.  ")).await;
    let server = GatewayTestServer::start(Arc::new(gemini_client(&upstream))).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/revisar"))
        .json(&json!({ "texto": "valeu pelo contato", "acao": "tornar formal" }))
        .send()
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body should be json");
    assert_eq!(
        body["texto_revisado"],
        "Prezado cliente, agradecemos o contato."
    );
}
