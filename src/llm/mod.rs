// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Provider implementations ────────────────────────────────────────────────
pub mod gemini;

// ── Infrastructure re-exports ───────────────────────────────────────────────
pub use http_client::build_http_client;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::CompletionClient;
pub use types::RawCompletion;

// ── Provider re-exports ─────────────────────────────────────────────────────
pub use gemini::GeminiClient;
