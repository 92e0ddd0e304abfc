//! Import rule text, live-validate it, and test it against a sample.

use anyhow::Result;
use yarforge_compiler::RuleValidator;
use yarforge_parser::ImportParser;
use yarforge_runtime::test_rule;

const RULE_TEXT: &str = r#"rule hello_scanner : demo {
  meta:
    author = "demo"

  strings:
    $hello = {48 45 4C 4C 4F}
    $greeting = "hi there" nocase

  condition:
    $hello or $greeting
}"#;

fn main() -> Result<()> {
    let imported = ImportParser::new().parse(RULE_TEXT);
    for line in &imported.dropped {
        eprintln!("ignored line: {line}");
    }

    let rule = imported.into_rule();

    let live = RuleValidator::new().validate_live(&rule);
    for error in &live.errors {
        eprintln!("{}: {}", error.field, error.message);
    }

    for sample in ["HELLO world", "Hi There!", "nothing here"] {
        println!("{sample:?} -> {}", test_rule(&rule, sample));
    }
    Ok(())
}
