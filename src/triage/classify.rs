use super::types::{ClassificationRequest, ClassificationResult};
use super::validator::parse_classification;
use crate::error::{InputError, Result};
use crate::llm::CompletionClient;
use crate::prompt::{CLASSIFICATION, TemplateEngine};
use std::sync::Arc;

/// Classifies an email and drafts a reply with a single completion call.
pub struct ClassificationService {
    client: Arc<dyn CompletionClient>,
    templates: Arc<TemplateEngine>,
}

impl ClassificationService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            templates: Arc::new(TemplateEngine::with_defaults()),
        }
    }

    /// Share a template set with other services.
    #[must_use]
    pub fn with_templates(mut self, templates: Arc<TemplateEngine>) -> Self {
        self.templates = templates;
        self
    }

    pub async fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult> {
        let email = request.email_text.as_str();
        if email.trim().is_empty() {
            return Err(InputError::EmptyField("email_texto").into());
        }
        tracing::debug!(chars = email.chars().count(), "classifying email");

        let prompt = self
            .templates
            .render_named(CLASSIFICATION.name, &[("EMAIL", email)])?;
        let raw = self.client.complete(&prompt).await?;
        tracing::debug!(provider = self.client.name(), output = %raw.as_str(), "model output");

        let result = parse_classification(raw.as_str())?;
        tracing::info!(category = %result.category, "email classified");
        Ok(result)
    }
}
