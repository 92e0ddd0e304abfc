//! Condition clause definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a condition clause checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    /// References a pattern by `$identifier`
    String,
    /// Numeric/unit comparison against the sample byte length
    Filesize,
    /// Free-form expression text
    Custom,
}

/// How a clause combines with the running result
///
/// Present on every condition except logically the first. Evaluation is a
/// left-to-right fold with no precedence grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    And,
    Or,
    Not,
}

impl ConditionOperator {
    /// Keyword form used in rule text
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::And => "and",
            ConditionOperator::Or => "or",
            ConditionOperator::Not => "not",
        }
    }

    /// Parse a keyword, case-insensitively
    pub fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "and" => Some(ConditionOperator::And),
            "or" => Some(ConditionOperator::Or),
            "not" => Some(ConditionOperator::Not),
            _ => None,
        }
    }
}

/// One clause of a rule's boolean expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Opaque unique identifier, assigned at creation and never reused
    pub id: Uuid,

    /// Clause kind
    #[serde(rename = "type")]
    pub kind: ConditionType,

    /// Combining operator; `None` on the first clause
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub operator: Option<ConditionOperator>,

    /// Kind-dependent payload: a `$identifier` reference, a filesize
    /// comparison such as `> 1KB`, or free expression text
    pub value: String,
}

impl RuleCondition {
    /// Create a condition with an empty value (the editing default)
    pub fn new(kind: ConditionType) -> Self {
        RuleCondition {
            id: Uuid::new_v4(),
            kind,
            operator: None,
            value: String::new(),
        }
    }

    /// Create a `$identifier` reference clause
    pub fn string_ref(value: impl Into<String>) -> Self {
        Self::new(ConditionType::String).with_value(value)
    }

    /// Create a filesize comparison clause
    pub fn filesize(value: impl Into<String>) -> Self {
        Self::new(ConditionType::Filesize).with_value(value)
    }

    /// Create a free-form expression clause
    pub fn custom(value: impl Into<String>) -> Self {
        Self::new(ConditionType::Custom).with_value(value)
    }

    /// Set the clause payload
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the combining operator
    pub fn with_operator(mut self, operator: ConditionOperator) -> Self {
        self.operator = Some(operator);
        self
    }
}
