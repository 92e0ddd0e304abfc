//! Sandboxed custom-condition expressions
//!
//! A deliberately narrow evaluator for free-form condition text. Exactly one
//! variable is bound: `filesize` (alias `size`), the sample byte length.
//! Supported syntax:
//! - number literals, `true`, `false`
//! - arithmetic: `+`, `-`, `*`, `/`, `%`
//! - comparisons: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! - boolean: `&&`, `||`, `!`
//! - parentheses for grouping
//!
//! No other identifiers, no function calls, no side effects. Any failure is
//! an error the engine converts to a non-match.

use crate::error::{Result, RuntimeError};

/// Value produced by an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ExprValue {
    Number(f64),
    Bool(bool),
}

impl ExprValue {
    /// Truthiness of the final result: booleans as-is, numbers non-zero
    pub(crate) fn truthy(self) -> bool {
        match self {
            ExprValue::Bool(b) => b,
            ExprValue::Number(n) => n != 0.0,
        }
    }

    fn number(self) -> Result<f64> {
        match self {
            ExprValue::Number(n) => Ok(n),
            ExprValue::Bool(_) => Err(RuntimeError::TypeError(
                "expected a number, found a boolean".to_string(),
            )),
        }
    }
}

/// Evaluate an expression with `filesize`/`size` bound
pub(crate) fn evaluate(input: &str, filesize: f64) -> Result<ExprValue> {
    eval_expression(input.trim(), filesize)
}

/// Precedence tiers, lowest first; each splits on the rightmost top-level
/// operator so chains associate left-to-right.
fn eval_expression(input: &str, filesize: f64) -> Result<ExprValue> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RuntimeError::InvalidExpression("empty expression".to_string()));
    }

    if let Some((left, _, right)) = split_binary(input, &["||"]) {
        let left = eval_expression(left, filesize)?;
        let right = eval_expression(right, filesize)?;
        return Ok(ExprValue::Bool(left.truthy() || right.truthy()));
    }

    if let Some((left, _, right)) = split_binary(input, &["&&"]) {
        let left = eval_expression(left, filesize)?;
        let right = eval_expression(right, filesize)?;
        return Ok(ExprValue::Bool(left.truthy() && right.truthy()));
    }

    if let Some((left, op, right)) = split_binary(input, &["==", "!=", "<=", ">=", "<", ">"]) {
        let left = eval_expression(left, filesize)?;
        let right = eval_expression(right, filesize)?;
        return eval_comparison(left, op, right);
    }

    if let Some((left, op, right)) = split_binary(input, &["+", "-"]) {
        let left = eval_expression(left, filesize)?.number()?;
        let right = eval_expression(right, filesize)?.number()?;
        let value = if op == "+" { left + right } else { left - right };
        return Ok(ExprValue::Number(value));
    }

    if let Some((left, op, right)) = split_binary(input, &["*", "/", "%"]) {
        let left = eval_expression(left, filesize)?.number()?;
        let right = eval_expression(right, filesize)?.number()?;
        let value = match op {
            "*" => left * right,
            "/" => left / right,
            _ => left % right,
        };
        return Ok(ExprValue::Number(value));
    }

    eval_primary(input, filesize)
}

fn eval_comparison(left: ExprValue, op: &str, right: ExprValue) -> Result<ExprValue> {
    let result = match (left, right) {
        (ExprValue::Number(l), ExprValue::Number(r)) => match op {
            "==" => l == r,
            "!=" => l != r,
            "<" => l < r,
            "<=" => l <= r,
            ">" => l > r,
            ">=" => l >= r,
            _ => unreachable!(),
        },
        (ExprValue::Bool(l), ExprValue::Bool(r)) => match op {
            "==" => l == r,
            "!=" => l != r,
            _ => {
                return Err(RuntimeError::TypeError(format!(
                    "cannot order booleans with {op}"
                )))
            }
        },
        _ => {
            return Err(RuntimeError::TypeError(
                "cannot compare a number with a boolean".to_string(),
            ))
        }
    };
    Ok(ExprValue::Bool(result))
}

fn eval_primary(input: &str, filesize: f64) -> Result<ExprValue> {
    let input = input.trim();

    if let Some(rest) = input.strip_prefix('!') {
        let value = eval_primary(rest.trim(), filesize)?;
        return Ok(ExprValue::Bool(!value.truthy()));
    }

    if input.starts_with('(') && input.ends_with(')') {
        return eval_expression(&input[1..input.len() - 1], filesize);
    }

    if input == "true" {
        return Ok(ExprValue::Bool(true));
    }
    if input == "false" {
        return Ok(ExprValue::Bool(false));
    }

    if let Ok(number) = input.parse::<f64>() {
        return Ok(ExprValue::Number(number));
    }

    if let Some(rest) = input.strip_prefix('-') {
        let value = eval_primary(rest.trim(), filesize)?.number()?;
        return Ok(ExprValue::Number(-value));
    }

    if input == "filesize" || input == "size" {
        return Ok(ExprValue::Number(filesize));
    }

    if input.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(RuntimeError::UnknownVariable(input.to_string()));
    }

    Err(RuntimeError::InvalidExpression(format!(
        "cannot parse: {input}"
    )))
}

/// Find the rightmost top-level occurrence of any operator in `ops`,
/// skipping parenthesized regions and positions adjacent to other operator
/// characters (so `<=` is never split as `<`, and a unary minus is never
/// taken as subtraction).
fn split_binary<'a>(input: &'a str, ops: &[&'static str]) -> Option<(&'a str, &'static str, &'a str)> {
    let mut depth = 0i32;

    // char_indices keeps every slice below on a character boundary; the
    // operators themselves are ASCII.
    for (i, c) in input.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => depth -= 1,
            _ => {}
        }
        if depth != 0 {
            continue;
        }

        for &op in ops {
            if !input[i..].starts_with(op) {
                continue;
            }

            let before_ok = !input[..i].ends_with(is_operator_char);
            let after_ok = input[i + op.len()..]
                .chars()
                .next()
                .map_or(true, |next| !is_operator_char(next));

            let left = input[..i].trim();
            let right = input[i + op.len()..].trim();
            let operands_ok = !left.is_empty()
                && !right.is_empty()
                && !left.ends_with(is_operator_char);

            if before_ok && after_ok && operands_ok {
                return Some((left, op, right));
            }
        }
    }

    None
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>' | '&' | '|' | '+' | '-' | '*' | '/' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<ExprValue> {
        evaluate(input, 2048.0)
    }

    fn truthy(input: &str) -> bool {
        eval(input).unwrap().truthy()
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval("42").unwrap(), ExprValue::Number(42.0));
        assert_eq!(eval("true").unwrap(), ExprValue::Bool(true));
        assert_eq!(eval("-5").unwrap(), ExprValue::Number(-5.0));
    }

    #[test]
    fn test_filesize_and_alias() {
        assert_eq!(eval("filesize").unwrap(), ExprValue::Number(2048.0));
        assert_eq!(eval("size").unwrap(), ExprValue::Number(2048.0));
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), ExprValue::Number(14.0));
        assert_eq!(eval("(2 + 3) * 4").unwrap(), ExprValue::Number(20.0));
        assert_eq!(eval("10 - 2 + 3").unwrap(), ExprValue::Number(11.0));
    }

    #[test]
    fn test_comparisons() {
        assert!(truthy("filesize > 1024"));
        assert!(truthy("filesize == 2 * 1024"));
        assert!(!truthy("filesize < 100"));
    }

    #[test]
    fn test_boolean_logic() {
        assert!(truthy("filesize > 1024 && filesize < 4096"));
        assert!(truthy("filesize > 1000000 || true"));
        assert!(truthy("!(filesize < 100)"));
    }

    #[test]
    fn test_unary_minus_beside_subtraction() {
        assert_eq!(eval("3 - -2").unwrap(), ExprValue::Number(5.0));
    }

    #[test]
    fn test_unknown_identifier_is_an_error() {
        assert!(matches!(
            eval("entrypoint > 10"),
            Err(RuntimeError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_malformed_expression_is_an_error() {
        assert!(eval("").is_err());
        assert!(eval("* 3").is_err());
        assert!(eval("filesize >").is_err());
    }

    #[test]
    fn test_no_function_calls_in_the_sandbox() {
        assert!(eval("uint16(0) == 0x5A4D").is_err());
    }

    #[test]
    fn test_non_ascii_input_is_an_error_not_a_panic() {
        assert!(eval("taille é > 1").is_err());
        assert!(eval("é").is_err());
        assert!(eval("größe == 2048").is_err());
    }
}
