//! Axum-based HTTP gateway exposing classification, revision and health routes.
//!
//! - Request body size limit (configurable, 256KB default)
//! - CORS open to any origin unless an origin list is configured
//! - Malformed or missing JSON bodies answer 400 with `{"error": ...}`

mod handlers;
mod server;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::llm::CompletionClient;
use crate::prompt::TemplateEngine;
use crate::triage::{ClassificationService, RevisionService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Label reported in place of a category when classification fails.
pub const ERROR_CATEGORY: &str = "Erro";

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ClassificationService>,
    pub reviser: Arc<RevisionService>,
}

impl AppState {
    /// Wire both services to one completion client and one template set.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let templates = Arc::new(TemplateEngine::with_defaults());
        Self {
            classifier: Arc::new(
                ClassificationService::new(Arc::clone(&client))
                    .with_templates(Arc::clone(&templates)),
            ),
            reviser: Arc::new(RevisionService::new(client).with_templates(templates)),
        }
    }
}

/// `POST /api/classificar` request body
#[derive(Debug, Deserialize, Serialize)]
pub struct ClassifyBody {
    #[serde(default)]
    pub email_texto: String,
}

/// `POST /api/classificar` response body, for success and processing failure alike
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClassifyResponse {
    pub categoria: String,
    pub resposta: String,
}

/// `POST /api/revisar` request body
#[derive(Debug, Deserialize, Serialize)]
pub struct ReviseBody {
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub acao: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReviseResponse {
    pub texto_revisado: String,
}
