//! Email triage and text revision over a [`CompletionClient`](crate::llm::CompletionClient).
//!
//! Both services are stateless: every call renders a fresh prompt, makes
//! exactly one completion call and returns a typed result or error.

mod classify;
mod revise;
pub mod types;
pub mod validator;

pub use classify::ClassificationService;
pub use revise::RevisionService;
pub use types::{
    Category, ClassificationRequest, ClassificationResult, RevisionRequest, RevisionResult,
};
pub use validator::parse_classification;
