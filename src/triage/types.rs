use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Triage outcome. Labels are the exact strings the model is asked to emit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Category {
    /// Needs an action, a decision or a specific answer.
    #[strum(serialize = "Produtivo")]
    #[serde(rename = "Produtivo")]
    Productive,
    /// Courtesy, thanks, announcements: nothing is required.
    #[strum(serialize = "Improdutivo")]
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub email_text: String,
}

impl ClassificationRequest {
    pub fn new(email_text: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
        }
    }
}

/// A validated classification. `suggested_reply` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub suggested_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRequest {
    pub original_text: String,
    pub action_instruction: String,
}

impl RevisionRequest {
    pub fn new(original_text: impl Into<String>, action_instruction: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            action_instruction: action_instruction.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionResult {
    pub revised_text: String,
}
