//! Rule text import
//!
//! Recognizes:
//! - a header of the shape `rule <name>[ : <tag> <tag>...] {`
//! - a strings section of `$<identifier> = {<hex>} | "<text>" [modifiers]` lines
//! - a condition section tokenized around the words `and`, `or`, `not`
//!
//! Each section is extracted independently; a section that fails to parse
//! yields an empty result instead of aborting the import.

use crate::error::{ParseError, Result};
use regex::Regex;
use serde::Serialize;
use yarforge_core::{ConditionOperator, ConditionType, Rule, RuleCondition, RuleString, StringType};

const STRINGS_MARKER: &str = "strings:";
const CONDITION_MARKER: &str = "condition:";
const COMMENT_MARKER: &str = "//";

/// Outcome of a best-effort import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportedRule {
    /// Rule name from the header, if one was recognized
    pub name: Option<String>,

    /// Header tags, in declaration order
    pub tags: Vec<String>,

    /// Recognized patterns, with fresh ids
    pub strings: Vec<RuleString>,

    /// Recognized condition clauses, with fresh ids
    pub conditions: Vec<RuleCondition>,

    /// String-section lines that matched nothing, so callers can surface
    /// what a partial import left behind
    pub dropped: Vec<String>,
}

impl ImportedRule {
    /// Fold the import into a fresh rule with empty meta
    pub fn into_rule(self) -> Rule {
        let mut rule = Rule::new(self.name.unwrap_or_default());
        for tag in self.tags {
            rule.add_tag(tag);
        }
        rule.strings = self.strings;
        rule.conditions = self.conditions;
        rule
    }
}

/// Best-effort rule text parser
pub struct ImportParser {
    string_line: Regex,
    header: Regex,
    operator_word: Regex,
}

impl ImportParser {
    /// Create a parser with its line grammar compiled
    pub fn new() -> Self {
        ImportParser {
            string_line: Regex::new(
                r#"^\$([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:\{([^}]*)\}|"([^"]*)")\s*(.*)$"#,
            )
            .unwrap(),
            header: Regex::new(r"rule\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*([^{]*))?\{").unwrap(),
            operator_word: Regex::new(r"(?i)\b(and|or|not)\b").unwrap(),
        }
    }

    /// Import rule text. Total: every failure degrades to an empty section.
    pub fn parse(&self, text: &str) -> ImportedRule {
        let (name, tags) = match self.parse_header(text) {
            Ok((name, tags)) => (Some(name), tags),
            Err(err) => {
                log::warn!("rule header not recognized: {err}");
                (None, Vec::new())
            }
        };

        let (strings, dropped) = match self.parse_strings(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("strings section not recognized: {err}");
                (Vec::new(), Vec::new())
            }
        };

        let conditions = match self.parse_conditions(text) {
            Ok(conditions) => conditions,
            Err(err) => {
                log::warn!("condition section not recognized: {err}");
                Vec::new()
            }
        };

        ImportedRule {
            name,
            tags,
            strings,
            conditions,
            dropped,
        }
    }

    fn parse_header(&self, text: &str) -> Result<(String, Vec<String>)> {
        let caps = self.header.captures(text).ok_or(ParseError::MalformedHeader)?;
        let name = caps[1].to_string();
        let tags = caps
            .get(2)
            .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Ok((name, tags))
    }

    fn parse_strings(&self, text: &str) -> Result<(Vec<RuleString>, Vec<String>)> {
        let start = text
            .find(STRINGS_MARKER)
            .ok_or(ParseError::MissingSection(STRINGS_MARKER))?
            + STRINGS_MARKER.len();
        let end = text[start..]
            .find(CONDITION_MARKER)
            .ok_or(ParseError::MissingSection(CONDITION_MARKER))?
            + start;

        let mut strings = Vec::new();
        let mut dropped = Vec::new();

        for line in text[start..end].lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let Some(caps) = self.string_line.captures(line) else {
                log::debug!("dropping unrecognized string line: {line}");
                dropped.push(line.to_string());
                continue;
            };

            let mut string = RuleString::new(&caps[1]);
            if let Some(hex) = caps.get(2) {
                string = string
                    .with_kind(StringType::Hex)
                    .with_value(hex.as_str().trim());
            } else if let Some(value) = caps.get(3) {
                string = string.with_value(value.as_str());
            }
            for word in caps[4].split_whitespace() {
                string.modifiers.set(word);
            }
            strings.push(string);
        }

        Ok((strings, dropped))
    }

    fn parse_conditions(&self, text: &str) -> Result<Vec<RuleCondition>> {
        let start = text
            .find(CONDITION_MARKER)
            .ok_or(ParseError::MissingSection(CONDITION_MARKER))?
            + CONDITION_MARKER.len();

        // Everything after the marker; the rule's closing brace is not part
        // of the last clause.
        let mut section = text[start..].trim();
        section = section.strip_suffix('}').unwrap_or(section).trim_end();

        let broken = self.operator_word.replace_all(section, "\n$1\n");

        let mut conditions = Vec::new();
        let mut current: Option<ConditionOperator> = None;

        for token in broken.split('\n') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            if let Some(op) = ConditionOperator::parse(token) {
                current = Some(op);
                continue;
            }

            let (kind, value) = if token.starts_with('$') {
                (ConditionType::String, token.to_string())
            } else if token.contains("filesize") {
                // Only the leading keyword is stripped; a later occurrence
                // stays part of the comparison value.
                (
                    ConditionType::Filesize,
                    token.replacen("filesize", "", 1).trim().to_string(),
                )
            } else {
                (ConditionType::Custom, token.to_string())
            };

            let mut condition = RuleCondition::new(kind).with_value(value);
            // The first clause never carries an operator, whatever preceded it.
            if !conditions.is_empty() {
                condition.operator = current;
            }
            conditions.push(condition);
        }

        Ok(conditions)
    }
}

impl Default for ImportParser {
    fn default() -> Self {
        Self::new()
    }
}
