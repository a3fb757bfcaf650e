// SPDX-License-Identifier: Unlicense
use std::{io::Read, path::Path};

use crate::{ast, eval, parser, printer};
use anyhow::{anyhow, Result};
use tracing::info;

/// A successfully parsed source together with the tree built from it.
pub struct Parsed {
    pub source: String,
    pub arena: ast::Arena,
    pub root: ast::Id,
}

impl Parsed {
    pub fn tree(&self) -> String {
        printer::tree(&self.arena, self.root, self.source.as_bytes())
    }

    pub fn infix(&self) -> String {
        printer::infix(&self.arena, self.root, self.source.as_bytes())
    }

    pub fn evaluate(&self) -> Result<i64> {
        eval::evaluate(&self.arena, self.root, self.source.as_bytes())
    }
}

pub fn read_file(source: &Path) -> Result<String> {
    let mut buf = String::new();
    let mut f = std::fs::File::open(source)?;
    f.read_to_string(&mut buf)?;
    Ok(buf)
}

pub fn parse_string(source: String, config: &parser::ParserConfig) -> Result<Parsed> {
    let parse = parser::parse_with_config(source.as_bytes(), config);
    info!(nodes = parse.arena.len(), ok = parse.ok(), "parsed expression");
    let (arena, root) = parse
        .into_result()
        .map_err(|e| anyhow!("failed to parse: {}", e))?;
    Ok(Parsed {
        source,
        arena,
        root,
    })
}

pub fn parse_file(source: &Path, config: &parser::ParserConfig) -> Result<Parsed> {
    info!(path = %source.display(), "reading source");
    let src = read_file(source)?;
    parse_string(src, config)
}

/// Parsed when neither a file nor an expression is given.
pub const DEMO_EXPRESSION: &str = "2 * 3 + 5 * 4 - 6 > 7 * 8";

/// Picks the input: a file wins over an inline expression, and with neither
/// the demo expression is used.
pub fn load(
    input: Option<&Path>,
    expr: Option<&str>,
    config: &parser::ParserConfig,
) -> Result<Parsed> {
    match (input, expr) {
        (Some(path), _) => parse_file(path, config),
        (None, Some(expr)) => parse_string(expr.to_string(), config),
        (None, None) => parse_string(DEMO_EXPRESSION.to_string(), config),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub tree: bool,
    pub infix: bool,
    pub eval: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            tree: true,
            infix: false,
            eval: false,
        }
    }
}

/// What the command line prints, and whether it should exit successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl Report {
    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

pub fn report(parsed: Result<Parsed>, options: &ReportOptions) -> Report {
    let mut stdout = String::new();
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            stdout.push_str("Error: expected a valid root\n");
            return Report {
                stdout,
                stderr: format!("Error: {}\n", e),
                success: false,
            };
        }
    };

    if options.tree {
        stdout.push_str(&parsed.tree());
    }
    if options.infix {
        stdout.push_str(&parsed.infix());
        stdout.push('\n');
    }
    if options.eval {
        match parsed.evaluate() {
            Ok(value) => stdout.push_str(&format!("result: {}\n", value)),
            Err(e) => {
                return Report {
                    stdout,
                    stderr: format!("Error: {}\n", e),
                    success: false,
                }
            }
        }
    }
    stdout.push_str("OK\n");
    Report {
        stdout,
        stderr: String::new(),
        success: true,
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs::File, io::Write};
    use anyhow::Result;
    use super::*;

    fn write_source(name: &str, src: &str) -> Result<std::path::PathBuf> {
        let path = env::temp_dir().join(format!("climb-{}-{name}.expr", std::process::id()));
        let mut f = File::create(&path)?;
        f.write_all(src.as_bytes())?;
        Ok(path)
    }

    #[test]
    fn driver_should_parse_and_evaluate_file() -> Result<()> {
        let src = r#"
        # the answer
        6 * 7
        "#;

        let path = write_source("basic_expression", src)?;
        let parsed = parse_file(&path, &parser::ParserConfig::default())?;
        std::fs::remove_file(&path)?;
        assert_eq!(parsed.evaluate()?, 42);
        assert_eq!(parsed.infix(), "(6 * 7)");
        assert_eq!(parsed.tree(), "Binary Operator: *\n    Leaf: 6\n    Leaf: 7\n");
        Ok(())
    }

    #[test]
    fn driver_should_report_parse_failure() {
        let err = parse_string("2 + 3 4".to_string(), &parser::ParserConfig::default())
            .err()
            .map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("failed to parse: expected end of input at offset 6, found Number")
        );
    }

    #[test]
    fn demo_expression_should_be_default_input() -> Result<()> {
        let config = parser::ParserConfig::default();
        let parsed = load(None, None, &config)?;
        assert_eq!(parsed.source, DEMO_EXPRESSION);

        let options = ReportOptions {
            infix: true,
            eval: true,
            ..ReportOptions::default()
        };
        let report = report(Ok(parsed), &options);
        assert!(report.success);
        assert_eq!(report.exit_code(), 0);
        assert!(report.stdout.starts_with("Binary Operator: >\n    Binary Operator: -\n"));
        assert!(report
            .stdout
            .ends_with("((((2 * 3) + (5 * 4)) - 6) > (7 * 8))\nresult: 0\nOK\n"));
        assert!(report.stderr.is_empty());
        Ok(())
    }

    #[test]
    fn inline_expression_should_win_over_demo() -> Result<()> {
        let parsed = load(None, Some("1 + 2"), &parser::ParserConfig::default())?;
        assert_eq!(parsed.infix(), "(1 + 2)");
        Ok(())
    }

    #[test]
    fn parse_failure_should_report_invalid_root() {
        let parsed = load(None, Some("+3"), &parser::ParserConfig::default());
        let report = report(parsed, &ReportOptions::default());
        assert!(!report.success);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.stdout, "Error: expected a valid root\n");
        assert_eq!(
            report.stderr,
            "Error: failed to parse: expected a number at offset 0, found BinaryOperator\n"
        );
    }

    #[test]
    fn eval_failure_should_exit_with_error() {
        let parsed = load(None, Some("1 / 0"), &parser::ParserConfig::default());
        let options = ReportOptions {
            tree: false,
            eval: true,
            ..ReportOptions::default()
        };
        let report = report(parsed, &options);
        assert!(!report.success);
        assert_eq!(report.exit_code(), 1);
        assert!(!report.stdout.contains("OK"));
        assert_eq!(report.stderr, "Error: division by zero\n");
    }

    #[test]
    fn quiet_report_should_only_print_status() {
        let parsed = load(None, Some("7"), &parser::ParserConfig::default());
        let options = ReportOptions {
            tree: false,
            ..ReportOptions::default()
        };
        assert_eq!(report(parsed, &options).stdout, "OK\n");
    }

    #[test]
    fn missing_file_should_fail() {
        let path = env::temp_dir().join("climb-does-not-exist.expr");
        assert!(parse_file(&path, &parser::ParserConfig::default()).is_err());
    }
}
