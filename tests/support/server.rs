#![allow(dead_code)]

use mailroom::config::GatewayConfig;
use mailroom::gateway::{AppState, run_gateway_with_listener};
use mailroom::llm::CompletionClient;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

pub struct GatewayTestServer {
    port: u16,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    pub async fn start(client: Arc<dyn CompletionClient>) -> Self {
        Self::start_with(client, GatewayConfig::default()).await
    }

    pub async fn start_with(client: Arc<dyn CompletionClient>, config: GatewayConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let state = AppState::new(client);
        let handle = tokio::spawn(async move {
            run_gateway_with_listener(
                "127.0.0.1",
                listener,
                state,
                &config,
                std::future::pending::<()>(),
            )
            .await
        });

        wait_until_gateway_ready(port).await;

        Self { port, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}
