use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use std::sync::Arc;

use crate::Config;
use crate::llm::{CompletionClient, GeminiClient};
use crate::transport::gateway::ClassifyResponse;
use crate::triage::{
    ClassificationRequest, ClassificationService, RevisionRequest, RevisionService,
};

fn completion_client(config: &Config) -> Result<Arc<dyn CompletionClient>> {
    let client = GeminiClient::from_config(config).context("create completion client")?;
    Ok(Arc::new(client))
}

async fn run_classify(config: &Config, text: String) -> Result<()> {
    let service = ClassificationService::new(completion_client(config)?);
    let result = service
        .classify(&ClassificationRequest::new(text))
        .await
        .context("classify email")?;

    let output = ClassifyResponse {
        categoria: result.category.to_string(),
        resposta: result.suggested_reply,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_revise(config: &Config, action: String, text: String) -> Result<()> {
    let service = RevisionService::new(completion_client(config)?);
    let result = service
        .revise(&RevisionRequest::new(text, action))
        .await
        .context("revise text")?;

    println!("{}", result.revised_text);
    Ok(())
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            crate::platform::daemon::run(config).await
        }
        Commands::Classify { text } => run_classify(&config, text).await,
        Commands::Revise { action, text } => run_revise(&config, action, text).await,
    }
}
