//! Evaluation engine modules

mod evaluator;
mod expression;
mod filesize;
mod matcher;

pub use evaluator::{test_rule, RuleEvaluator};
