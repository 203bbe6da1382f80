mod commands;
mod config;
mod diagnostics;
mod document;
mod error;
mod filters;
mod report;
mod resolver;
mod rewriter;
mod scanner;
mod types;
mod walker;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;
use crate::types::ReplaceStrategy;

#[derive(Parser)]
#[command(
    name = "casefix",
    version,
    about = "Repair mis-cased local file references in HTML documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report references that would be corrected, without writing (exit 1 if any)
    Check(RunArgs),
    /// Correct references in every HTML file under a directory, in place
    Fix(RunArgs),
    /// Print the on-disk casing of a path, resolving every segment
    Resolve {
        /// Path to look up, relative to the current directory or absolute
        path: String,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Root directory to process
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// How corrections are applied (overrides `.casefix.toml`)
    #[arg(long, value_enum)]
    strategy: Option<ReplaceStrategy>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check(&args.dir, args.strategy, args.format),
        Commands::Fix(args) => commands::fix(&args.dir, args.strategy, args.format),
        Commands::Resolve { path } => commands::resolve(&path),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3)
        },
    };
}
