use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::visibility::VisibilityRule;

/// Input widget kinds a control can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
}

impl ControlType {
    pub const ALL: [ControlType; 8] = [
        ControlType::Text,
        ControlType::Email,
        ControlType::Number,
        ControlType::Textarea,
        ControlType::Select,
        ControlType::Checkbox,
        ControlType::Radio,
        ControlType::Date,
    ];

    /// Wire name, also used as the prefix for generated keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlType::Text => "text",
            ControlType::Email => "email",
            ControlType::Number => "number",
            ControlType::Textarea => "textarea",
            ControlType::Select => "select",
            ControlType::Checkbox => "checkbox",
            ControlType::Radio => "radio",
            ControlType::Date => "date",
        }
    }

    /// Human readable name used for freshly created controls.
    pub fn display_name(&self) -> &'static str {
        match self {
            ControlType::Text => "Text",
            ControlType::Email => "Email",
            ControlType::Number => "Number",
            ControlType::Textarea => "Text area",
            ControlType::Select => "Select",
            ControlType::Checkbox => "Checkbox",
            ControlType::Radio => "Radio group",
            ControlType::Date => "Date",
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, ControlType::Checkbox)
    }

    /// Whether `options` carry meaning for this control.
    pub fn uses_options(&self) -> bool {
        matches!(self, ControlType::Select | ControlType::Radio)
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independently applicable value constraints of a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Validators {
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
    }
}

/// One entry of a select or radio control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A leaf of the schema tree: one input whose value is published under `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldControl {
    pub id: String,
    pub control_type: ControlType,
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Validators>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityRule>,
}

impl FieldControl {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        control_type: ControlType,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            control_type,
            key: key.into(),
            label: label.into(),
            placeholder: None,
            default_value: None,
            required: None,
            validators: None,
            options: None,
            visibility: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityRule) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// The value the runtime seeds this control with.
    pub fn initial_value(&self) -> Value {
        match &self.default_value {
            Some(value) => value.clone(),
            None if self.control_type.is_checkbox() => Value::Bool(false),
            None => Value::Null,
        }
    }
}
