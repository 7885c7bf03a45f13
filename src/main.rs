#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use anyhow::{Context, Result};
use clap::Parser;
use mailroom::app::logging::{BOOT_LEVEL, level_filter};
use mailroom::{Cli, Config};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS.
    // Without it reqwest cannot pick a process-level CryptoProvider.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    // Initialize logging before config so load failures are reported.
    let builder = FmtSubscriber::builder()
        .with_max_level(BOOT_LEVEL)
        .with_filter_reloading();
    let reload = builder.reload_handle();
    tracing::subscriber::set_global_default(builder.finish())
        .context("setting default subscriber failed")?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return Err(e.into());
        }
    };
    reload
        .reload(level_filter(&config.log_level))
        .context("applying configured log level failed")?;

    mailroom::app::dispatch::dispatch(cli, config).await
}
