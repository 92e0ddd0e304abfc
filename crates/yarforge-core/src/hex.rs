//! Hex pattern helpers
//!
//! Hex pattern values are whitespace-tolerant sequences of two-digit byte
//! pairs (e.g. `"48 45 4C 4C 4F"`). The validator and the evaluator share
//! this parser so both agree on what counts as well-formed.

use crate::error::{CoreError, Result};

/// Parse a hex pattern value into its byte sequence.
///
/// Whitespace between pairs is ignored. An empty value, an odd number of
/// digits, or any non-hex character is an error.
pub fn parse_hex_bytes(value: &str) -> Result<Vec<u8>> {
    let compact: String = value.split_whitespace().collect();

    if compact.is_empty() || compact.len() % 2 != 0 {
        return Err(CoreError::InvalidHex(value.to_string()));
    }

    let mut bytes = Vec::with_capacity(compact.len() / 2);
    for chunk in compact.as_bytes().chunks(2) {
        let byte = std::str::from_utf8(chunk)
            .ok()
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| CoreError::InvalidHex(value.to_string()))?;
        bytes.push(byte);
    }

    Ok(bytes)
}
