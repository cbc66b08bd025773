//! Value validators attached to compiled controls.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid literal")
});

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("a value is required")]
    Required,
    #[error("must be checked")]
    RequiredTrue,
    #[error("not a valid email address")]
    Email,
    #[error("must be at least {min} (got {actual})")]
    Min { min: f64, actual: f64 },
    #[error("must be at most {max} (got {actual})")]
    Max { max: f64, actual: f64 },
    #[error("must be at least {required} characters (got {actual})")]
    #[serde(rename_all = "camelCase")]
    MinLength { required: usize, actual: usize },
    #[error("must be at most {required} characters (got {actual})")]
    #[serde(rename_all = "camelCase")]
    MaxLength { required: usize, actual: usize },
    #[error("does not match pattern {pattern}")]
    Pattern { pattern: String },
}

/// A compiled constraint.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Non-empty: not null, not an empty string, not an empty list.
    Required,
    /// Exactly boolean `true` (required checkboxes).
    RequiredTrue,
    Email,
    Min(f64),
    Max(f64),
    MinLength(usize),
    MaxLength(usize),
    /// Whole-value match of `source`.
    Pattern { source: String, regex: Regex },
}

/// Null, empty text and empty lists count as "no value".
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Numbers, or text that parses as a number.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Validator {
    /// Compile a pattern validator; the expression must match the whole value.
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Validator::Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// Check `value`; `None` means it passes.
    ///
    /// Every validator except the two required ones lets empty values through.
    pub fn validate(&self, value: &Value) -> Option<ValidationError> {
        match self {
            Validator::Required => is_empty_value(value).then_some(ValidationError::Required),
            Validator::RequiredTrue => {
                (value != &Value::Bool(true)).then_some(ValidationError::RequiredTrue)
            }
            _ if is_empty_value(value) => None,
            Validator::Email => match value {
                Value::String(s) if EMAIL_REGEX.is_match(s) => None,
                _ => Some(ValidationError::Email),
            },
            Validator::Min(min) => numeric(value)
                .filter(|actual| actual < min)
                .map(|actual| ValidationError::Min { min: *min, actual }),
            Validator::Max(max) => numeric(value)
                .filter(|actual| actual > max)
                .map(|actual| ValidationError::Max { max: *max, actual }),
            Validator::MinLength(required) => length(value)
                .filter(|actual| actual < required)
                .map(|actual| ValidationError::MinLength {
                    required: *required,
                    actual,
                }),
            Validator::MaxLength(required) => length(value)
                .filter(|actual| actual > required)
                .map(|actual| ValidationError::MaxLength {
                    required: *required,
                    actual,
                }),
            Validator::Pattern { source, regex } => match as_text(value) {
                Some(text) if regex.is_match(&text) => None,
                _ => Some(ValidationError::Pattern {
                    pattern: source.clone(),
                }),
            },
        }
    }
}
