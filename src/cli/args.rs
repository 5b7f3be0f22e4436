//! CLI argument parsing using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// guardrail-evals CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "guardrail-evals")]
#[command(about = "Compliance gates for cataloged prompt sections")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides guardrail-evals.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Input locations shared by every gate
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct InputArgs {
    /// Directory holding the prompt document and catalog
    #[arg(long)]
    pub prompts_dir: Option<PathBuf>,

    /// Prompt document, relative to the prompts directory
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Catalog JSON, relative to the prompts directory
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory receiving the result artifacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Available gates
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan every cataloged section against the pattern configuration
    #[command(visible_alias = "eval")]
    Adversarial {
        #[command(flatten)]
        inputs: InputArgs,

        /// Pattern configuration JSON (legacy or current schema)
        #[arg(long)]
        patterns: Option<PathBuf>,
    },

    /// Compare catalog anchors with the anchored sections of the document
    Coverage {
        #[command(flatten)]
        inputs: InputArgs,

        /// Minimum coverage percentage required to pass
        #[arg(long, value_parser = parse_percentage)]
        threshold: Option<f64>,

        /// Write the result to this file instead of the output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check ROE token and authorization metadata per safety class
    Roe {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn parse_percentage(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("{} is outside 0-100", value));
    }
    Ok(value)
}
