//! Google Gemini completion client (Generative Language API, `generateContent`).
//!
//! The API key travels in the `x-goog-api-key` header rather than the query
//! string, so it can never surface through a transport error's URL.

use crate::config::Config;
use crate::error::{ConfigError, UpstreamError};
use crate::llm::{
    build_http_client, sanitize_api_error,
    traits::CompletionClient,
    types::RawCompletion,
};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

const PROVIDER: &str = "gemini";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Single-shot, non-streaming Gemini client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
    max_output_tokens: u32,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_output_tokens: 8192,
            client: build_http_client(120),
        }
    }

    /// Build from validated process configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let completion = &config.completion;
        Ok(Self {
            api_key: config.api_key()?.to_string(),
            model: completion.model.clone(),
            base_url: completion.base_url.trim_end_matches('/').to_string(),
            temperature: completion.temperature,
            max_output_tokens: completion.max_output_tokens,
            client: build_http_client(completion.request_timeout_secs),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(&self.model)
        )
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    async fn call_api(&self, prompt: &str) -> Result<GenerateContentResponse, UpstreamError> {
        let request = self.build_request(prompt);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message: sanitize_api_error(&error_text),
            });
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(PROVIDER, e))?;

        if let Some(err) = result.error.as_ref() {
            return Err(UpstreamError::Transport {
                provider: PROVIDER.to_string(),
                message: sanitize_api_error(&err.message),
            });
        }

        Ok(result)
    }

    fn extract_text(result: &GenerateContentResponse) -> Result<String, UpstreamError> {
        let candidate = result.candidates.as_ref().and_then(|c| c.first());

        let text = candidate
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            if let Some(reason) = candidate.and_then(|c| c.finish_reason.as_deref()) {
                tracing::warn!("Gemini returned no text (finish reason: {reason})");
            }
            return Err(UpstreamError::EmptyResponse {
                provider: PROVIDER.to_string(),
            });
        }

        Ok(text)
    }
}

impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RawCompletion, UpstreamError>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.call_api(prompt).await?;
            if let Some(usage) = result.usage_metadata.as_ref() {
                tracing::debug!(
                    model = %self.model,
                    prompt_tokens = usage.prompt_token_count,
                    output_tokens = usage.candidates_token_count,
                    "Gemini completion finished"
                );
            }
            Self::extract_text(&result).map(RawCompletion::new)
        })
    }
}
