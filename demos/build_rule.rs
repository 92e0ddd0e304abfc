//! Build a rule with the model API, validate it, and emit its text.

use anyhow::Result;
use yarforge_compiler::{RuleEmitter, RuleValidator};
use yarforge_core::{ConditionOperator, Rule, RuleCondition, RuleString, StringModifiers, StringType};

fn main() -> Result<()> {
    let mut rule = Rule::new("suspicious_downloader")
        .with_tag("trojan")
        .with_string(
            RuleString::new("url")
                .with_value("http://evil.example/payload")
                .with_modifiers(StringModifiers {
                    nocase: true,
                    ..Default::default()
                }),
        )
        .with_string(
            RuleString::new("mz")
                .with_kind(StringType::Hex)
                .with_value("4D 5A"),
        )
        .with_condition(RuleCondition::string_ref("$mz"))
        .with_condition(RuleCondition::string_ref("$url").with_operator(ConditionOperator::And))
        .with_condition(RuleCondition::filesize("< 5MB").with_operator(ConditionOperator::And));

    rule.set_meta("author", "demo");
    rule.set_meta("description", "demo downloader rule");
    rule.set_meta("version", "1.0");

    let validator = RuleValidator::new();
    let errors = validator.validate(&rule);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("blocked: {error}");
        }
        anyhow::bail!("rule failed pre-export validation");
    }

    println!("{}", RuleEmitter::emit(&rule));
    Ok(())
}
