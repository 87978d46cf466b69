use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use minimake_core::{Make, MakeError};

mod commands;

/// minimake - a minimal make-style build runner
#[derive(Parser)]
#[command(name = "minimake")]
#[command(about = "A minimal make-style build runner")]
#[command(version)]
struct Cli {
    /// Path to the rule file
    #[arg(short, long, default_value = "Makefile", global = true)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a target after running everything it depends on
    Run {
        /// Name of the target to run
        #[arg(short, long)]
        target: String,
    },
    /// Show the order a run would execute, without executing it
    Plan {
        /// Name of the target to plan
        #[arg(short, long)]
        target: String,
    },
    /// Show every target with its direct dependencies
    Graph,
    /// List the targets defined in the rule file
    List,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let rule_text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read rule file '{}'", cli.file.display()))?;

    let make = Make::build(&rule_text)?;
    for warning in make.warnings() {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    match cli.command {
        Commands::Run { target } => commands::run::execute(&make, &target),
        Commands::Plan { target } => commands::plan::execute(&make, &target),
        Commands::Graph => commands::graph::execute(&make),
        Commands::List => commands::list::execute(&make),
    }
}

/// Exit codes distinguish the broad failure classes: 1 for a rule file that
/// does not parse, 2 for a command that failed to execute, 5 for everything
/// else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<MakeError>() {
        Some(MakeError::InvalidMakefileFormat { .. }) => 1,
        Some(MakeError::CommandExecutionFailed { .. }) => 2,
        _ => 5,
    }
}
