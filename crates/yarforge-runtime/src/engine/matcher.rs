//! Pattern search over a sample payload
//!
//! Text patterns honor the `nocase`, `wide` and `fullword` modifiers; hex
//! patterns are byte-sequence searches over the sample's UTF-8 encoding.
//! `wide` outranks `fullword`: only one search strategy runs even when both
//! flags are set.

use regex::Regex;
use yarforge_core::{hex, RuleString, StringType};

/// Does this pattern occur in the sample?
pub(crate) fn match_string(string: &RuleString, sample: &str) -> bool {
    match string.kind {
        StringType::Text => match_text(string, sample),
        StringType::Hex => match_hex(&string.value, sample),
    }
}

fn match_text(string: &RuleString, sample: &str) -> bool {
    let modifiers = &string.modifiers;

    let (pattern, haystack) = if modifiers.nocase {
        (string.value.to_lowercase(), sample.to_lowercase())
    } else {
        (string.value.clone(), sample.to_string())
    };

    if modifiers.wide {
        // Simulate the 16-bit encoding: a null byte after every character.
        let wide: String = pattern.chars().flat_map(|c| [c, '\0']).collect();
        return haystack.contains(&wide);
    }

    if modifiers.fullword {
        return match_fullword(&pattern, &haystack);
    }

    haystack.contains(&pattern)
}

fn match_fullword(pattern: &str, haystack: &str) -> bool {
    let anchored = format!(r"\b{}\b", regex::escape(pattern));
    match Regex::new(&anchored) {
        Ok(word) => word.is_match(haystack),
        Err(err) => {
            tracing::warn!("fullword pattern did not compile: {err}");
            false
        }
    }
}

fn match_hex(value: &str, sample: &str) -> bool {
    let needle = match hex::parse_hex_bytes(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!("hex pattern rejected: {err}");
            return false;
        }
    };
    if needle.is_empty() {
        return false;
    }

    sample
        .as_bytes()
        .windows(needle.len())
        .any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yarforge_core::StringModifiers;

    fn text(value: &str, modifiers: StringModifiers) -> RuleString {
        RuleString::new("s")
            .with_value(value)
            .with_modifiers(modifiers)
    }

    #[test]
    fn test_plain_substring() {
        let s = text("needle", StringModifiers::default());
        assert!(match_string(&s, "hay needle hay"));
        assert!(!match_string(&s, "haystack"));
    }

    #[test]
    fn test_nocase() {
        let s = text("NeedLe", StringModifiers {
            nocase: true,
            ..Default::default()
        });
        assert!(match_string(&s, "found a NEEDLE here"));
    }

    #[test]
    fn test_wide_requires_null_bytes() {
        let s = text("HI", StringModifiers {
            wide: true,
            ..Default::default()
        });
        assert!(match_string(&s, "H\0I\0"));
        assert!(!match_string(&s, "HI"));
    }

    #[test]
    fn test_wide_outranks_fullword() {
        let s = text("HI", StringModifiers {
            wide: true,
            fullword: true,
            ..Default::default()
        });
        // Only the wide search runs: the plain word form does not match.
        assert!(!match_string(&s, "HI"));
        assert!(match_string(&s, "xH\0I\0x"));
    }

    #[test]
    fn test_fullword_boundaries() {
        let s = text("cmd", StringModifiers {
            fullword: true,
            ..Default::default()
        });
        assert!(match_string(&s, "run cmd now"));
        assert!(!match_string(&s, "runcmdnow"));
    }

    #[test]
    fn test_hex_search_at_any_offset() {
        let s = RuleString::new("h")
            .with_kind(yarforge_core::StringType::Hex)
            .with_value("48 45");
        assert!(match_string(&s, "xxHExx"));
        assert!(match_string(&s, "HE"));
        assert!(!match_string(&s, "H E"));
    }

    #[test]
    fn test_malformed_hex_is_a_non_match() {
        let s = RuleString::new("h")
            .with_kind(yarforge_core::StringType::Hex)
            .with_value("48 4G");
        assert!(!match_string(&s, "HE"));
    }

    #[test]
    fn test_modifiers_ignored_on_hex() {
        let s = RuleString::new("h")
            .with_kind(yarforge_core::StringType::Hex)
            .with_value("48 45")
            .with_modifiers(StringModifiers {
                nocase: true,
                wide: true,
                ..Default::default()
            });
        assert!(match_string(&s, "xxHExx"));
    }
}
