use super::AppState;
use super::handlers::{handle_classify, handle_health, handle_revise};

use crate::config::GatewayConfig;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Bind `host:port` and serve until `shutdown` resolves.
pub async fn run_gateway(
    host: &str,
    port: u16,
    state: AppState,
    config: &GatewayConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, state, config, shutdown).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    state: AppState,
    config: &GatewayConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    print_gateway_banner(&format!("{host}:{actual_port}"), &config.cors_origins);

    let app = build_app(state, config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

fn print_gateway_banner(display_addr: &str, cors_origins: &[String]) {
    tracing::info!("Gateway listening on {display_addr}");
    tracing::info!("  POST /api/classificar");
    tracing::info!("  POST /api/revisar");
    tracing::info!("  GET  /health");
    if cors_origins.is_empty() {
        tracing::info!("  CORS disabled");
    } else {
        tracing::info!("  CORS origins: {}", cors_origins.join(", "));
    }
}

fn cors_layer(cors_origins: &[String]) -> Option<CorsLayer> {
    if cors_origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if cors_origins.iter().any(|origin| origin.trim() == "*") {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();
    Some(layer.allow_origin(origins))
}

pub fn build_app(state: AppState, config: &GatewayConfig) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/classificar", post(handle_classify))
        .route("/api/revisar", post(handle_revise))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    match cors_layer(&config.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}
