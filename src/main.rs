//! guardrail-evals CLI entry point

use clap::Parser;
use guardrail_evals::cli::{Cli, Command};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "GUARDRAIL_EVALS_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Command::Adversarial { inputs, patterns } => {
            guardrail_evals::cli::adversarial::run_adversarial(inputs, patterns.as_deref(), cli.color)
        }
        Command::Coverage {
            inputs,
            threshold,
            out,
        } => guardrail_evals::cli::coverage::run_coverage(
            inputs,
            *threshold,
            out.as_deref(),
            cli.color,
        ),
        Command::Roe { inputs } => guardrail_evals::cli::roe::run_roe(inputs, cli.color),
    };

    process::exit(exit_code);
}
