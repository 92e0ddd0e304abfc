//! Integration tests for the evaluation engine

use yarforge_core::{
    ConditionOperator, Rule, RuleCondition, RuleString, StringModifiers, StringType,
};
use yarforge_runtime::{test_rule, RuleEvaluator};

#[test]
fn test_filesize_conditions_against_2048_byte_sample() {
    let sample = "x".repeat(2048);
    let fs = |value: &str| Rule::new("t").with_condition(RuleCondition::filesize(value));

    assert!(test_rule(&fs("> 1KB"), &sample));
    assert!(!test_rule(&fs("> 5MB"), &sample));
    assert!(test_rule(&fs("<= 2KB"), &sample));
}

#[test]
fn test_wide_string_match() {
    let rule = Rule::new("t")
        .with_string(
            RuleString::new("s1")
                .with_value("HI")
                .with_modifiers(StringModifiers {
                    wide: true,
                    ..Default::default()
                }),
        )
        .with_condition(RuleCondition::string_ref("$s1"));

    assert!(test_rule(&rule, "H\0I\0"));
    assert!(!test_rule(&rule, "HI"));
}

#[test]
fn test_hex_pattern_found_at_any_offset() {
    let rule = Rule::new("t")
        .with_string(
            RuleString::new("h")
                .with_kind(StringType::Hex)
                .with_value("48 45"),
        )
        .with_condition(RuleCondition::string_ref("$h"));

    assert!(test_rule(&rule, "HE"));
    assert!(test_rule(&rule, "...HELLO"));
    assert!(!test_rule(&rule, "EH"));
}

#[test]
fn test_nocase_and_fullword_interplay() {
    let rule = Rule::new("t")
        .with_string(
            RuleString::new("w")
                .with_value("CMD")
                .with_modifiers(StringModifiers {
                    nocase: true,
                    fullword: true,
                    ..Default::default()
                }),
        )
        .with_condition(RuleCondition::string_ref("$w"));

    assert!(test_rule(&rule, "run cmd now"));
    assert!(!test_rule(&rule, "runcmdnow"));
}

#[test]
fn test_custom_condition_binds_filesize() {
    let sample = "x".repeat(2048);
    let rule = Rule::new("t").with_condition(RuleCondition::custom("filesize == 2 * 1024"));
    assert!(test_rule(&rule, &sample));

    let alias = Rule::new("t").with_condition(RuleCondition::custom("size > 1000 && size < 3000"));
    assert!(test_rule(&alias, &sample));
}

#[test]
fn test_sample_length_is_byte_length() {
    // Two characters, but four UTF-8 bytes.
    let sample = "éé";
    let rule = Rule::new("t").with_condition(RuleCondition::custom("filesize == 4"));
    assert!(test_rule(&rule, sample));
}

#[test]
fn test_mixed_condition_kinds() {
    let rule = Rule::new("t")
        .with_string(RuleString::new("needle").with_value("needle"))
        .with_condition(RuleCondition::string_ref("$needle"))
        .with_condition(RuleCondition::filesize("< 1KB").with_operator(ConditionOperator::And))
        .with_condition(RuleCondition::custom("filesize > 3").with_operator(ConditionOperator::And));

    assert!(test_rule(&rule, "a needle in a haystack"));
    assert!(!test_rule(&rule, "just hay"));
}

#[test]
fn test_evaluator_is_reusable_and_pure() {
    let evaluator = RuleEvaluator::new();
    let rule = Rule::new("t")
        .with_string(RuleString::new("a").with_value("alpha"))
        .with_condition(RuleCondition::string_ref("$a"));

    let before = rule.clone();
    for _ in 0..3 {
        assert!(evaluator.test(&rule, "alpha"));
        assert!(!evaluator.test(&rule, "beta"));
    }
    assert_eq!(rule, before);
}

#[test]
fn test_non_ascii_custom_condition_is_a_non_match() {
    let rule = Rule::new("t").with_condition(RuleCondition::custom("taille é > 1"));
    assert!(!test_rule(&rule, "sample"));
}

#[test]
fn test_malformed_inputs_never_panic() {
    let rule = Rule::new("t")
        .with_string(
            RuleString::new("bad")
                .with_kind(StringType::Hex)
                .with_value("zz zz"),
        )
        .with_condition(RuleCondition::string_ref("$bad"))
        .with_condition(RuleCondition::filesize("enormous").with_operator(ConditionOperator::Or))
        .with_condition(RuleCondition::custom(")(").with_operator(ConditionOperator::Or));

    assert!(!test_rule(&rule, "sample"));
}
