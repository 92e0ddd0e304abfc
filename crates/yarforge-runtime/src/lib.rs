//! YARFORGE Runtime - sample evaluation engine
//!
//! Predicts whether a rule would match a sample payload. The engine is a
//! pure function of the rule and the sample: no I/O, no retained state, no
//! fatal error path; every internal failure degrades to a non-match.

pub mod engine;
pub mod error;

pub use engine::{test_rule, RuleEvaluator};
pub use error::RuntimeError;
