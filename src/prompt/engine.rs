use crate::error::PromptError;
use std::borrow::Cow;
use std::collections::HashMap;

/// Literal `{PLACEHOLDER}` substitution over a set of named templates.
///
/// Values are inserted verbatim, with no escaping, and the output is never
/// re-scanned: a value that itself contains `{TEXTO}` stays as typed.
/// Placeholders without a binding are left in place.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    templates: HashMap<String, Cow<'static, str>>,
}

impl TemplateEngine {
    /// Create an engine with no registered templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the built-in classification and revision templates.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        for template in super::templates::ALL {
            engine.add_template(template.name, template.body);
        }
        engine
    }

    /// Register a template, replacing any previous one with the same name.
    pub fn add_template(&mut self, name: &str, content: impl Into<Cow<'static, str>>) {
        self.templates.insert(name.to_string(), content.into());
    }

    /// Render a registered template.
    pub fn render_named(
        &self,
        name: &str,
        bindings: &[(&str, &str)],
    ) -> Result<String, PromptError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| PromptError::NotFound(name.to_string()))?;
        Ok(Self::render(template, bindings))
    }

    /// Render a one-off template string.
    pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let bound = after.find('}').and_then(|close| {
                let key = &after[..close];
                bindings
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (close, *value))
            });

            match bound {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}
