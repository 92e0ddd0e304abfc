//! YARFORGE Compiler - rule text emission and validation
//!
//! Two pure functions over the rule model:
//! - the emitter renders a rule to its canonical text, totally: an
//!   incomplete rule still renders, so the preview can track every edit;
//! - the validator runs the blocking pre-export pass (plain messages) and
//!   the live pass (field-addressed messages for inline form feedback).

pub mod emitter;
pub mod validator;

pub use emitter::RuleEmitter;
pub use validator::{FieldError, LiveValidation, RuleValidator};
