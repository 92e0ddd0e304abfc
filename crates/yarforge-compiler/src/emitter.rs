//! Rule text emission
//!
//! Deterministic and total: any rule renders, complete or not. Sections are
//! always emitted in the fixed order `meta`, `strings`, `condition`, and the
//! output is byte-stable for a given rule so imports of emitted text can be
//! compared against the original model.

use yarforge_core::{ConditionType, Rule, RuleCondition, RuleString, StringType};

/// Renders a rule to its canonical text
pub struct RuleEmitter;

impl RuleEmitter {
    /// Render the full rule text
    pub fn emit(rule: &Rule) -> String {
        let tags = if rule.tags.is_empty() {
            String::new()
        } else {
            format!(" : {}", rule.tags.join(" "))
        };

        let meta: Vec<String> = rule
            .meta
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("    {key} = \"{value}\""))
            .collect();

        let strings: Vec<String> = rule.strings.iter().map(Self::format_string).collect();

        let conditions: Vec<String> = rule
            .conditions
            .iter()
            .enumerate()
            .map(|(index, condition)| Self::format_condition(condition, index))
            .collect();

        format!(
            "rule {name}{tags} {{\n  meta:\n{meta}\n\n  strings:\n{strings}\n\n  condition:\n    {conditions}\n}}",
            name = rule.name,
            meta = meta.join("\n"),
            strings = strings.join("\n"),
            conditions = conditions.join(" "),
        )
    }

    /// Render one pattern line
    fn format_string(string: &RuleString) -> String {
        let (open, close) = match string.kind {
            StringType::Text => ('"', '"'),
            StringType::Hex => ('{', '}'),
        };

        let modifiers = string.modifiers.active().join(" ");
        let modifiers = if modifiers.is_empty() {
            String::new()
        } else {
            format!(" {modifiers}")
        };

        format!(
            "    ${identifier} = {open}{value}{close}{modifiers}",
            identifier = string.identifier,
            value = string.value,
        )
    }

    /// Render one condition clause; only the first clause omits its operator
    fn format_condition(condition: &RuleCondition, index: usize) -> String {
        let operator = match condition.operator {
            Some(op) if index > 0 => format!("{} ", op.as_str()),
            _ => String::new(),
        };

        match condition.kind {
            ConditionType::Filesize => format!("{operator}filesize {}", condition.value),
            ConditionType::String | ConditionType::Custom => {
                format!("{operator}{}", condition.value)
            }
        }
    }
}
