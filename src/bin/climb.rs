// SPDX-License-Identifier: Unlicense
use std::path::PathBuf;

use clap::Parser;
use climb::{driver, ParserConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "climb")]
#[command(about = "Parse an arithmetic expression and print its tree", version)]
struct Cli {
    /// Source file holding one expression
    input: Option<PathBuf>,

    /// Expression given on the command line
    #[arg(short, long, conflicts_with = "input")]
    expr: Option<String>,

    /// Maximum number of precedence levels climbed at once
    #[arg(long, default_value_t = ParserConfig::default().max_depth)]
    max_depth: usize,

    /// Don't print the tree
    #[arg(long)]
    no_tree: bool,

    /// Print the fully parenthesized form
    #[arg(long)]
    infix: bool,

    /// Print the value of the expression
    #[arg(long)]
    eval: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ParserConfig {
        max_depth: cli.max_depth,
    };
    let parsed = driver::load(cli.input.as_deref(), cli.expr.as_deref(), &config);
    let options = driver::ReportOptions {
        tree: !cli.no_tree,
        infix: cli.infix,
        eval: cli.eval,
    };

    let report = driver::report(parsed, &options);
    print!("{}", report.stdout);
    eprint!("{}", report.stderr);
    std::process::exit(report.exit_code());
}
