use super::types::{RevisionRequest, RevisionResult};
use crate::error::{InputError, Result};
use crate::llm::CompletionClient;
use crate::prompt::{REVISION, TemplateEngine};
use std::sync::Arc;

/// Rewrites a text according to a free-form instruction.
///
/// The model output is returned trimmed and otherwise untouched; there is
/// no structured contract to validate.
pub struct RevisionService {
    client: Arc<dyn CompletionClient>,
    templates: Arc<TemplateEngine>,
}

impl RevisionService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            templates: Arc::new(TemplateEngine::with_defaults()),
        }
    }

    #[must_use]
    pub fn with_templates(mut self, templates: Arc<TemplateEngine>) -> Self {
        self.templates = templates;
        self
    }

    pub async fn revise(&self, request: &RevisionRequest) -> Result<RevisionResult> {
        let text = request.original_text.as_str();
        let action = request.action_instruction.as_str();
        if text.trim().is_empty() {
            return Err(InputError::EmptyField("texto").into());
        }
        if action.trim().is_empty() {
            return Err(InputError::EmptyField("acao").into());
        }
        tracing::debug!(chars = text.chars().count(), action, "revising text");

        let prompt = self
            .templates
            .render_named(REVISION.name, &[("ACAO", action), ("TEXTO", text)])?;
        let raw = self.client.complete(&prompt).await?;

        Ok(RevisionResult {
            revised_text: raw.as_str().trim().to_string(),
        })
    }
}
