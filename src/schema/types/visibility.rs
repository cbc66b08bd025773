use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_visible() -> bool {
    true
}

/// How the results of several conditions are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    /// Logical AND.
    #[default]
    All,
    /// Logical OR.
    Any,
}

/// Comparison applied between a dependency's current value and `Condition::value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Includes,
    Contains,
    IsChecked,
    /// Any operator name this engine does not know. Always evaluates to false.
    #[serde(other)]
    Unknown,
}

/// One predicate over another control's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub depends_on_key: String,
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Condition {
    pub fn new(
        depends_on_key: impl Into<String>,
        operator: ConditionOperator,
        value: Option<Value>,
    ) -> Self {
        Self {
            depends_on_key: depends_on_key.into(),
            operator,
            value,
        }
    }
}

/// Per-control rule deciding whether it is shown and submitted.
///
/// Without conditions `visible_by_default` is used as-is; as soon as at least
/// one condition is present it is ignored and the combined conditions decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRule {
    #[serde(default = "default_visible")]
    pub visible_by_default: bool,
    #[serde(default)]
    pub mode: VisibilityMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Default for VisibilityRule {
    fn default() -> Self {
        Self {
            visible_by_default: true,
            mode: VisibilityMode::All,
            conditions: Vec::new(),
        }
    }
}

impl VisibilityRule {
    pub fn when(mode: VisibilityMode, conditions: Vec<Condition>) -> Self {
        Self {
            visible_by_default: true,
            mode,
            conditions,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible_by_default: false,
            ..Self::default()
        }
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}
