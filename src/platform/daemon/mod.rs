use crate::config::Config;
use crate::llm::{CompletionClient, GeminiClient};
use crate::transport::gateway::{AppState, run_gateway};
use anyhow::{Context, Result};
use std::sync::Arc;

pub mod liveness;

pub use liveness::{
    HealthProbe, HttpHealthProbe, LivenessHandle, LivenessKeeper, LivenessProbeState, ProbePhase,
    ProbeSchedule,
};

/// Build the gateway state and the liveness keeper.
///
/// Only a missing completion credential is fatal here; liveness problems
/// degrade to an idle keeper.
pub fn prepare(config: &Config) -> Result<(AppState, LivenessKeeper)> {
    let client: Arc<dyn CompletionClient> =
        Arc::new(GeminiClient::from_config(config).context("create completion client")?);
    tracing::info!(
        provider = client.name(),
        model = %config.completion.model,
        "Completion client ready"
    );

    let keeper = LivenessKeeper::from_config(&config.liveness);
    Ok((AppState::new(client), keeper))
}

/// Serve the gateway and run the liveness keeper until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let (state, keeper) = prepare(&config)?;
    let keeper = keeper.spawn();

    let served = run_gateway(
        &config.gateway.host,
        config.gateway.port,
        state,
        &config.gateway,
        shutdown_signal(),
    )
    .await;

    keeper.shutdown().await;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
