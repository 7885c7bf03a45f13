/// Untrusted text returned by a completion service.
///
/// Nothing about its shape is guaranteed. Consumers either pass it through
/// verbatim or run it through `triage::validator` before relying on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    pub text: String,
}

impl RawCompletion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
