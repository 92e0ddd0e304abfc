//! Rule aggregate definitions

use super::condition::RuleCondition;
use super::string::RuleString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conventional meta keys, in the order they are rendered
pub(crate) const CONVENTIONAL_KEYS: [&str; 4] = ["author", "description", "date", "version"];

/// Open string-to-string metadata mapping
///
/// Entry order is preserved so emission is deterministic. Empty values are
/// kept in the model (the form shows them) and skipped by the emitter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleMeta {
    entries: Vec<(String, String)>,
}

impl RuleMeta {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping pre-seeded with the conventional keys, all empty
    /// except `version` which defaults to `1.0`
    pub fn conventional() -> Self {
        let mut meta = Self::new();
        for key in CONVENTIONAL_KEYS {
            meta.set(key, "");
        }
        meta.set("version", "1.0");
        meta
    }

    /// Set a key, replacing any existing entry in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when no entry has a non-empty value
    pub fn is_effectively_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_empty())
    }
}

/// Aggregate root: everything the editing session knows about one rule
///
/// The rule is the single source of truth; the emitter, validator and
/// evaluator are pure functions over it and never mutate it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Rule name (identifier-shaped once valid)
    pub name: String,

    /// Header tags; insertion-ordered, duplicates collapsed
    pub tags: Vec<String>,

    /// Metadata mapping
    #[serde(default)]
    pub meta: RuleMeta,

    /// Named patterns, in declaration order
    pub strings: Vec<RuleString>,

    /// Condition clauses, in evaluation order
    pub conditions: Vec<RuleCondition>,
}

impl Rule {
    /// Create a named rule with no tags, patterns or conditions
    pub fn new(name: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a tag; duplicates are collapsed
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Builder form of [`add_tag`](Self::add_tag)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    /// Remove a tag by value
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Append a pattern
    pub fn add_string(&mut self, string: RuleString) {
        self.strings.push(string);
    }

    /// Builder form of [`add_string`](Self::add_string)
    pub fn with_string(mut self, string: RuleString) -> Self {
        self.add_string(string);
        self
    }

    /// Remove a pattern by id; returns whether anything was removed
    pub fn remove_string(&mut self, id: Uuid) -> bool {
        let before = self.strings.len();
        self.strings.retain(|s| s.id != id);
        self.strings.len() != before
    }

    /// Append a condition clause
    pub fn add_condition(&mut self, condition: RuleCondition) {
        self.conditions.push(condition);
    }

    /// Builder form of [`add_condition`](Self::add_condition)
    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.add_condition(condition);
        self
    }

    /// Remove a condition by id; returns whether anything was removed
    pub fn remove_condition(&mut self, id: Uuid) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.id != id);
        self.conditions.len() != before
    }

    /// Set a meta entry
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.set(key, value);
    }

    /// Resolve a `$identifier` reference to its pattern, if declared
    ///
    /// When identifiers collide the first declaration wins, matching
    /// evaluation order.
    pub fn string_by_reference(&self, reference: &str) -> Option<&RuleString> {
        self.strings.iter().find(|s| s.reference() == reference)
    }
}
