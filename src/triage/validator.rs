//! Turns untrusted completion text into a [`ClassificationResult`].
//!
//! This is the one place the model-output boundary is enforced. The text is
//! decoded into a loose JSON value first and only then projected into the
//! strict type, field by field.

use super::types::{Category, ClassificationResult};
use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Accepted names for the category field, in lookup order.
const CATEGORY_KEYS: [&str; 3] = ["categoria", "category", "classificacao"];
/// Accepted names for the suggested reply field, in lookup order.
const REPLY_KEYS: [&str; 3] = ["resposta", "reply", "resposta_automatica"];

const FENCE: &str = "```";

/// A line made only of three backticks and an optional language tag.
fn is_fence_line(line: &str) -> bool {
    line.trim_end().strip_prefix(FENCE).is_some_and(|tag| {
        tag.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
    })
}

/// Trim, then drop at most one leading and one trailing fence line.
///
/// Text without fences is returned trimmed and otherwise untouched.
pub fn strip_fences(text: &str) -> &str {
    let mut body = text.trim();

    let first_line_end = body.find('\n').unwrap_or(body.len());
    if is_fence_line(&body[..first_line_end]) {
        body = body.get(first_line_end + 1..).unwrap_or("");
    }

    if let Some(last_line_start) = body.rfind('\n').map(|i| i + 1) {
        if is_fence_line(&body[last_line_start..]) {
            body = &body[..last_line_start];
        }
    } else if is_fence_line(body) {
        body = "";
    }

    body.trim()
}

fn lookup<'a>(
    map: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Result<&'a Value, ValidationError> {
    keys.iter()
        .find_map(|key| map.get(*key))
        .ok_or(ValidationError::MissingKey(keys[0]))
}

fn non_empty_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ValidationError::EmptyValue(field))
}

/// Parse and validate a classification reply from the model.
///
/// No retry, no repair: anything that is not a JSON object with a known
/// category label and a non-empty reply is rejected.
pub fn parse_classification(raw_text: &str) -> Result<ClassificationResult, ValidationError> {
    let body = strip_fences(raw_text);
    if !body.starts_with('{') {
        return Err(ValidationError::NotAnObject);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let category_label = non_empty_str(lookup(&map, &CATEGORY_KEYS)?, CATEGORY_KEYS[0])?;
    let reply = non_empty_str(lookup(&map, &REPLY_KEYS)?, REPLY_KEYS[0])?;

    let category =
        Category::from_str(category_label).map_err(|_| ValidationError::UnknownCategory)?;

    Ok(ClassificationResult {
        category,
        suggested_reply: reply.trim().to_string(),
    })
}
