//! Error types for the evaluation engine
//!
//! These never escape `RuleEvaluator::test`: a failed clause evaluates to
//! `false` at the engine boundary.

use thiserror::Error;

/// Runtime error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Type error: {0}")]
    TypeError(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
