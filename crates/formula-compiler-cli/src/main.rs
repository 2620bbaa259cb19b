//! Formula compiler CLI - compile a formula and evaluate it once

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use formula_compiler::{tokenize, CompileOptions, Compiler, ParsedFormula};

#[derive(Parser)]
#[command(name = "fcc")]
#[command(author, version, about = "Compile a spreadsheet-style formula and evaluate it")]
struct Cli {
    /// The formula to be compiled
    #[arg(short, long, default_value = "ROUND(2^1 + 2^3 + EXP(5*LN(x)))")]
    formula: String,

    /// Argument values, in ascending variable order (repeat for X0, X1, ...).
    /// Defaults to 2 for every variable the formula uses.
    #[arg(short = 'x', allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Require the formula to use exactly as many variables as values given
    #[arg(long)]
    strict: bool,

    /// Print the token stream before the tree
    #[arg(long)]
    tokens: bool,

    /// How to print the syntax tree
    #[arg(long, value_enum, default_value = "text")]
    format: TreeFormat,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

const DEFAULT_VALUE: f64 = 2.0;

#[derive(Clone, Copy, ValueEnum)]
enum TreeFormat {
    /// Fully parenthesized formula
    Text,
    /// Rust debug representation of the tree
    Debug,
    /// JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.tokens {
        print_tokens(&cli.formula)?;
    }

    let parsed = formula_compiler::parse_formula(&cli.formula)
        .with_context(|| format!("Failed to parse '{}'", cli.formula))?;

    print_tree(&parsed, cli.format)?;

    let values = argument_values(&cli.values, &parsed);
    let options = CompileOptions::new(values.len()).with_strict(cli.strict);
    let fun = Compiler::new(options)
        .compile_parsed(&parsed)
        .context("Failed to compile formula")?;

    let result = fun.call(&values)?;
    let args: Vec<String> = values.iter().map(|v| format_number(*v)).collect();

    println!("\n=================\nEvaluation Result\n=================");
    println!("{}({}) = {}", fun.name(), args.join(", "), format_number(result));

    Ok(())
}

fn print_tokens(formula: &str) -> Result<()> {
    let tokens = tokenize(formula).with_context(|| format!("Failed to tokenize '{formula}'"))?;
    let text: Vec<String> = tokens.iter().map(ToString::to_string).collect();

    println!("======\nTokens\n======");
    println!("{}\n", text.join(" "));
    Ok(())
}

fn print_tree(parsed: &ParsedFormula, format: TreeFormat) -> Result<()> {
    println!("====================\nAbstract Syntax Tree\n====================");
    match format {
        TreeFormat::Text => println!("{}", parsed.expr),
        TreeFormat::Debug => println!("{:#?}", parsed.expr),
        TreeFormat::Json => {
            let json = serde_json::to_string_pretty(&parsed.expr)
                .context("Failed to serialize syntax tree")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Values given on the command line, or 2 for each variable of the formula
fn argument_values(given: &[f64], parsed: &ParsedFormula) -> Vec<f64> {
    if given.is_empty() {
        vec![DEFAULT_VALUE; parsed.variables.len()]
    } else {
        given.to_vec()
    }
}

/// Print integral results without a fractional part
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
