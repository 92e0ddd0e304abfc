//! Unit-aware filesize comparison
//!
//! Condition values look like `> 1KB`, `<= 2048`, `>= 5 MB`. Units multiply
//! by powers of 1024. A value without a recognized comparison falls back to
//! exact equality; a malformed value is a non-match.

use regex::Regex;

pub(crate) struct FilesizeComparator {
    expr: Regex,
}

impl FilesizeComparator {
    pub(crate) fn new() -> Self {
        FilesizeComparator {
            expr: Regex::new(r"([<>]=?)\s*(\d+)\s*(KB|MB|GB)?").unwrap(),
        }
    }

    /// Compare a sample byte length against a condition value
    pub(crate) fn compare(&self, value: &str, size: u64) -> bool {
        let Some(caps) = self.expr.captures(value) else {
            tracing::debug!("filesize value did not parse: {value:?}");
            return false;
        };

        let Ok(amount) = caps[2].parse::<u64>() else {
            return false;
        };
        let multiplier = match caps.get(3).map(|m| m.as_str()) {
            Some("KB") => 1024,
            Some("MB") => 1024 * 1024,
            Some("GB") => 1024 * 1024 * 1024,
            _ => 1,
        };
        let Some(threshold) = amount.checked_mul(multiplier) else {
            return false;
        };

        match &caps[1] {
            ">" => size > threshold,
            ">=" => size >= threshold,
            "<" => size < threshold,
            "<=" => size <= threshold,
            _ => size == threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_thresholds() {
        let cmp = FilesizeComparator::new();
        // 2048 bytes == 2 * 1024
        assert!(cmp.compare("> 1KB", 2048));
        assert!(!cmp.compare("> 5MB", 2048));
        assert!(cmp.compare("<= 2KB", 2048));
    }

    #[test]
    fn test_unitless_bytes() {
        let cmp = FilesizeComparator::new();
        assert!(cmp.compare("< 100", 99));
        assert!(!cmp.compare("< 100", 100));
        assert!(cmp.compare(">=100", 100));
    }

    #[test]
    fn test_malformed_value_is_a_non_match() {
        let cmp = FilesizeComparator::new();
        assert!(!cmp.compare("roughly big", 2048));
        assert!(!cmp.compare("", 2048));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let cmp = FilesizeComparator::new();
        assert!(cmp.compare(">   1   KB", 2048));
    }
}
