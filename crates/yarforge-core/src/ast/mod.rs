//! Rule AST definitions

mod condition;
mod rule;
mod string;

pub use condition::{ConditionOperator, ConditionType, RuleCondition};
pub use rule::{Rule, RuleMeta};
pub use string::{RuleString, StringModifiers, StringType};
