//! Pattern (string) definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a pattern's raw value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringType {
    /// Literal text, searched as a substring of the sample
    Text,
    /// Whitespace-tolerant two-digit hex byte pairs
    Hex,
}

/// Matching modifiers for text patterns
///
/// Any subset is valid, including none. Modifiers declared on a hex
/// pattern are accepted but have no effect during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringModifiers {
    /// Case-insensitive matching
    #[serde(default)]
    pub nocase: bool,
    /// Match the 16-bit-per-character encoding of the pattern
    #[serde(default)]
    pub wide: bool,
    /// Match the plain 8-bit encoding (the default search already covers
    /// this; the flag is carried for round-tripping)
    #[serde(default)]
    pub ascii: bool,
    /// Match only at word boundaries
    #[serde(default)]
    pub fullword: bool,
}

impl StringModifiers {
    /// Names of the active modifiers, in canonical declaration order
    pub fn active(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.nocase {
            names.push("nocase");
        }
        if self.wide {
            names.push("wide");
        }
        if self.ascii {
            names.push("ascii");
        }
        if self.fullword {
            names.push("fullword");
        }
        names
    }

    /// True when no modifier is set
    pub fn is_empty(&self) -> bool {
        !(self.nocase || self.wide || self.ascii || self.fullword)
    }

    /// Set a modifier by its keyword. Unknown keywords are ignored and
    /// reported as `false`.
    pub fn set(&mut self, name: &str) -> bool {
        match name {
            "nocase" => self.nocase = true,
            "wide" => self.wide = true,
            "ascii" => self.ascii = true,
            "fullword" => self.fullword = true,
            _ => return false,
        }
        true
    }
}

/// One named pattern of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleString {
    /// Opaque unique identifier, assigned at creation and never reused
    pub id: Uuid,

    /// Name referenced elsewhere as `$identifier`
    pub identifier: String,

    /// Raw pattern text; interpretation depends on `kind`
    pub value: String,

    /// Text or hex
    #[serde(rename = "type")]
    pub kind: StringType,

    /// Matching modifiers (text patterns only)
    #[serde(default)]
    pub modifiers: StringModifiers,
}

impl RuleString {
    /// Create a new text pattern with an empty value
    pub fn new(identifier: impl Into<String>) -> Self {
        RuleString {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            value: String::new(),
            kind: StringType::Text,
            modifiers: StringModifiers::default(),
        }
    }

    /// Set the pattern value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the pattern kind
    pub fn with_kind(mut self, kind: StringType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the modifier flags
    pub fn with_modifiers(mut self, modifiers: StringModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The `$identifier` form used in condition clauses
    pub fn reference(&self) -> String {
        format!("${}", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_string_defaults() {
        let s = RuleString::new("str1");
        assert_eq!(s.identifier, "str1");
        assert_eq!(s.value, "");
        assert_eq!(s.kind, StringType::Text);
        assert!(s.modifiers.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = RuleString::new("a");
        let b = RuleString::new("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_modifier_names_in_order() {
        let mods = StringModifiers {
            nocase: true,
            fullword: true,
            ..Default::default()
        };
        assert_eq!(mods.active(), vec!["nocase", "fullword"]);
    }

    #[test]
    fn test_set_modifier_by_keyword() {
        let mut mods = StringModifiers::default();
        assert!(mods.set("wide"));
        assert!(!mods.set("base64"));
        assert!(mods.wide);
    }

    #[test]
    fn test_reference() {
        let s = RuleString::new("mz_header");
        assert_eq!(s.reference(), "$mz_header");
    }
}
