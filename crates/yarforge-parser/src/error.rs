//! Parser error types
//!
//! These errors stay internal to the import pipeline: a failed section is
//! logged and replaced with an empty result, so `ImportParser::parse`
//! itself is total.

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A section marker was not found in the input
    #[error("Missing section marker: {0}")]
    MissingSection(&'static str),

    /// The rule header did not match `rule <name>[ : <tags>] {`
    #[error("Malformed rule header")]
    MalformedHeader,
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
