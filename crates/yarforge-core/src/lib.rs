//! YARFORGE Core - rule model shared across the YARFORGE crates
//!
//! This crate provides the structural representation of a YARA rule as it
//! is edited: the rule aggregate, its named patterns, its condition clauses
//! and its metadata. The model holds shape only; correctness checks live in
//! `yarforge-compiler` so the editing session may hold transiently invalid
//! state.

pub mod ast;
pub mod error;
pub mod hex;

// Re-export commonly used types
pub use ast::{
    ConditionOperator, ConditionType, Rule, RuleCondition, RuleMeta, RuleString, StringModifiers,
    StringType,
};
pub use error::CoreError;
