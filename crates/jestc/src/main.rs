//! jestc - semantic checker for Jest programs
//!
//! Usage: jestc [OPTIONS] <input>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use jest_compiler::common::DiagnosticReporter;
use jest_compiler::driver::{check_with_context, CheckConfig, CheckContext};
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

/// Log verbosity when RUST_LOG is not set
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "jestc")]
#[command(version)]
#[command(about = "Semantic checker for the Jest language", long_about = None)]
struct Args {
    /// Input source file (.jest)
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Log level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(true) => {}
        // Diagnostics were already reported
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(level: LogLevel) {
    let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    if args.verbose {
        eprintln!("Checking {}", args.input.display());
    }

    let config = CheckConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };
    let ctx = CheckContext::new(filename, file_id, &reporter);

    let ok = check_with_context(&source, &ctx, &config).is_ok();
    if ok && args.verbose {
        eprintln!("No errors found in {}", args.input.display());
    }
    Ok(ok)
}
