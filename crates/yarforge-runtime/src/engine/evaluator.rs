//! Condition fold and per-condition dispatch
//!
//! Conditions are folded strictly left-to-right with no precedence
//! grouping, reproducing the builder's historical semantics: `not` is
//! asymmetric (it applies when either the current clause or the previous
//! clause carried it), and `or`/`and` look at the previous clause's
//! operator. This is intentionally not standard boolean-expression
//! evaluation and must not be "fixed" to it.

use super::{expression, filesize::FilesizeComparator, matcher};
use yarforge_core::{ConditionOperator, ConditionType, Rule, RuleCondition};

/// Evaluates rules against sample payloads
pub struct RuleEvaluator {
    filesize: FilesizeComparator,
}

impl RuleEvaluator {
    /// Create an evaluator with its comparison grammar compiled
    pub fn new() -> Self {
        RuleEvaluator {
            filesize: FilesizeComparator::new(),
        }
    }

    /// Would this rule match the sample? Never fails: every internal error
    /// degrades to a non-match.
    pub fn test(&self, rule: &Rule, sample: &str) -> bool {
        let mut result = true;
        let mut previous: Option<ConditionOperator> = None;

        for condition in &rule.conditions {
            let current = self.eval_condition(rule, condition, sample);

            if condition.operator == Some(ConditionOperator::Not)
                || previous == Some(ConditionOperator::Not)
            {
                result = result && !current;
            } else if previous == Some(ConditionOperator::Or) {
                result = result || current;
            } else {
                // Previous `and`, or the first clause.
                result = result && current;
            }

            previous = condition.operator;
        }

        tracing::debug!(rule = %rule.name, result, "evaluated rule against sample");
        result
    }

    fn eval_condition(&self, rule: &Rule, condition: &RuleCondition, sample: &str) -> bool {
        match condition.kind {
            ConditionType::String => match rule.string_by_reference(&condition.value) {
                Some(string) => matcher::match_string(string, sample),
                None => {
                    tracing::debug!("unresolved string reference: {}", condition.value);
                    false
                }
            },
            ConditionType::Filesize => self.filesize.compare(&condition.value, sample.len() as u64),
            ConditionType::Custom => {
                match expression::evaluate(&condition.value, sample.len() as f64) {
                    Ok(value) => value.truthy(),
                    Err(err) => {
                        tracing::warn!("custom condition failed, treating as non-match: {err}");
                        false
                    }
                }
            }
        }
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience over [`RuleEvaluator`]
pub fn test_rule(rule: &Rule, sample: &str) -> bool {
    RuleEvaluator::new().test(rule, sample)
}
