use super::types::RawCompletion;
use crate::error::UpstreamError;
use std::future::Future;
use std::pin::Pin;

/// "Send prompt text, receive response text."
///
/// The only seam through which the crate talks to a model. One call per
/// invocation: implementations must not retry, and must report transport,
/// timeout and non-success failures as `UpstreamError`.
pub trait CompletionClient: Send + Sync {
    /// Provider identifier used in logs and errors (e.g. "gemini").
    fn name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RawCompletion, UpstreamError>> + Send + 'a>>;
}
