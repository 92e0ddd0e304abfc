//! YARFORGE Parser - best-effort rule text importer
//!
//! Converts rule text back into the structured model. This is deliberately
//! not a formal grammar parser: it recognizes the bounded grammar the
//! emitter produces (header, `meta:`, `strings:`, `condition:` sections)
//! with regexes, and prefers partial rules over failed imports: a section
//! that cannot be extracted comes back empty, never as an error.

pub mod error;
pub mod import;

pub use error::{ParseError, Result};
pub use import::{ImportParser, ImportedRule};
