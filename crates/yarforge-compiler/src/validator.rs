//! Two-tier rule validation
//!
//! The pre-export pass gates copy/download and returns plain messages; the
//! live pass runs on every model mutation and returns field-addressed
//! messages for inline form feedback. Both recompute from scratch on every
//! call; the model itself enforces nothing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use yarforge_core::{ConditionType, Rule, StringType};

/// A field-addressed validation error from the live pass
///
/// Field addresses follow the form layout: `name`, `strings[i].identifier`,
/// `strings[i].value`, `conditions`, `conditions[i].value`, `meta.version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of the live pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveValidation {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

/// Runs both validation passes over a rule
pub struct RuleValidator {
    identifier: Regex,
    hex_value: Regex,
    filesize_value: Regex,
    version: Regex,
}

impl RuleValidator {
    /// Create a validator with its shape checks compiled
    pub fn new() -> Self {
        RuleValidator {
            identifier: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap(),
            hex_value: Regex::new(r"^([0-9A-Fa-f]{2}\s*)+$").unwrap(),
            filesize_value: Regex::new(r"^[<>]=?\s*\d+(\s*(KB|MB|GB))?$").unwrap(),
            version: Regex::new(r"^\d+\.\d+(\.\d+)?$").unwrap(),
        }
    }

    /// Pre-export pass: blocking, plain messages
    pub fn validate(&self, rule: &Rule) -> Vec<String> {
        let mut errors = Vec::new();

        if rule.name.is_empty() {
            errors.push("Rule name is required".to_string());
        } else if !self.identifier.is_match(&rule.name) {
            errors.push(
                "Rule name must start with a letter or underscore and contain only \
                 alphanumeric characters and underscores"
                    .to_string(),
            );
        }

        let has_standalone_condition = rule
            .conditions
            .iter()
            .any(|c| matches!(c.kind, ConditionType::Filesize | ConditionType::Custom));
        if rule.strings.is_empty() && !has_standalone_condition {
            errors.push("At least one string or condition is required".to_string());
        }

        for (index, string) in rule.strings.iter().enumerate() {
            if string.identifier.is_empty() {
                errors.push(format!("String #{} must have an identifier", index + 1));
            }
            if string.value.is_empty() {
                errors.push(format!("String #{} must have a value", index + 1));
            }
        }

        if rule.conditions.is_empty() {
            errors.push("At least one condition is required".to_string());
        }

        log::debug!("pre-export pass found {} error(s)", errors.len());
        errors
    }

    /// Live pass: non-blocking, field-addressed messages
    pub fn validate_live(&self, rule: &Rule) -> LiveValidation {
        let mut errors = Vec::new();

        if rule.name.is_empty() {
            errors.push(FieldError::new("name", "Rule name is required"));
        } else if !self.identifier.is_match(&rule.name) {
            errors.push(FieldError::new(
                "name",
                "Rule name must start with a letter or underscore and contain only \
                 alphanumeric characters",
            ));
        }

        for (index, string) in rule.strings.iter().enumerate() {
            if string.identifier.is_empty() {
                errors.push(FieldError::new(
                    format!("strings[{index}].identifier"),
                    format!("String #{} must have an identifier", index + 1),
                ));
            } else if !self.identifier.is_match(&string.identifier) {
                errors.push(FieldError::new(
                    format!("strings[{index}].identifier"),
                    "String identifier must be alphanumeric and start with a letter or underscore",
                ));
            }

            if string.value.is_empty() {
                errors.push(FieldError::new(
                    format!("strings[{index}].value"),
                    format!("String #{} must have a value", index + 1),
                ));
            } else if string.kind == StringType::Hex && !self.hex_value.is_match(&string.value) {
                errors.push(FieldError::new(
                    format!("strings[{index}].value"),
                    "Invalid hex string format",
                ));
            }
        }

        if rule.conditions.is_empty() {
            errors.push(FieldError::new(
                "conditions",
                "At least one condition is required",
            ));
        }

        for (index, condition) in rule.conditions.iter().enumerate() {
            if condition.value.is_empty() {
                errors.push(FieldError::new(
                    format!("conditions[{index}].value"),
                    format!("Condition #{} must have a value", index + 1),
                ));
            }

            match condition.kind {
                ConditionType::String => {
                    if rule.string_by_reference(&condition.value).is_none() {
                        errors.push(FieldError::new(
                            format!("conditions[{index}].value"),
                            format!("String {} is not defined", condition.value),
                        ));
                    }
                }
                ConditionType::Filesize => {
                    if !self.filesize_value.is_match(&condition.value) {
                        errors.push(FieldError::new(
                            format!("conditions[{index}].value"),
                            "Invalid filesize format. Example: \"> 1MB\" or \"< 500KB\"",
                        ));
                    }
                }
                ConditionType::Custom => {
                    if condition.value.trim().is_empty() {
                        errors.push(FieldError::new(
                            format!("conditions[{index}].value"),
                            "Custom condition cannot be empty",
                        ));
                    }
                }
            }
        }

        if let Some(version) = rule.meta.get("version") {
            if !version.is_empty() && !self.version.is_match(version) {
                errors.push(FieldError::new(
                    "meta.version",
                    "Version must be in format x.y or x.y.z",
                ));
            }
        }

        LiveValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}
