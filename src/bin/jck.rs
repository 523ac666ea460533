#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use jck::cli::args::{CheckArgs, CliArgs, Command};
use jck::cli::driver;
use jck::cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_REPORTED: i32 = 1;

fn main() -> Result<()> {
    // No-op unless JCK_LOG or RUST_LOG is set (see src/tracing_config.rs).
    jck::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let code = match &args.command {
        Command::Check(check) => run_check(check, &cwd)?,
    };
    std::process::exit(code);
}

fn run_check(args: &CheckArgs, cwd: &std::path::Path) -> Result<i32> {
    let outcome = driver::run_check(args, cwd)?;
    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(pretty && !args.json);

    if args.json {
        println!("{}", reporter.render_json(&outcome.diagnostics)?);
    } else if !outcome.diagnostics.is_empty() {
        eprint!("{}", reporter.render(&outcome.diagnostics));
        eprintln!();
        eprintln!("{}", reporter.summary(&outcome.diagnostics));
        if outcome.dropped > 0 {
            eprintln!("({} more diagnostics not shown)", outcome.dropped);
        }
    }

    if outcome.diagnostics.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_DIAGNOSTICS_REPORTED)
    }
}
