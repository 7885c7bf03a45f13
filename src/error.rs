use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Mailroom`.
///
/// Each failure class has its own variant so the gateway can map it to a
/// status code without string matching. Startup and CLI glue keep using
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum MailroomError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Caller input ─────────────────────────────────────────────────────
    #[error("input: {0}")]
    Input(#[from] InputError),

    // ── Completion service ───────────────────────────────────────────────
    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),

    // ── Model output contract ────────────────────────────────────────────
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    // ── Prompt / Template ────────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),
}

impl MailroomError {
    /// True when the caller sent something unusable, as opposed to a
    /// processing failure on our side or upstream.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing completion API credential (set GEMINI_API_KEY or GOOGLE_API_KEY)")]
    MissingCredential,

    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Input errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum InputError {
    #[error("the \"{0}\" field is required and must not be empty")]
    EmptyField(&'static str),
}

// ─── Upstream errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("provider {provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("provider {provider} timed out")]
    Timeout { provider: String },

    #[error("provider {provider} returned {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("provider {provider} returned no text")]
    EmptyResponse { provider: String },
}

impl UpstreamError {
    pub fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Transport {
                provider: provider.to_string(),
                message: crate::llm::sanitize_api_error(&err.without_url().to_string()),
            }
        }
    }
}

// ─── Validation errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("model output is not a JSON object")]
    NotAnObject,

    #[error("model output is malformed JSON: {0}")]
    Malformed(String),

    #[error("model output is missing the \"{0}\" key")]
    MissingKey(&'static str),

    #[error("model output has an empty or non-string \"{0}\" value")]
    EmptyValue(&'static str),

    #[error("model output has an unrecognized category label")]
    UnknownCategory,
}

// ─── Prompt / Template errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("template not found: {0}")]
    NotFound(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MailroomError>;
