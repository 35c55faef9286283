mod check;
mod completions;
mod explain;
mod plan;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use plan::PlanCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for valobj_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "valobj")]
#[command(version)]
#[command(about = "Generate validated value objects from TOML declarations")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Plan(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the value objects declared in valobj.toml
    Check(CheckCommand),

    /// Show the members and converters generated for each value object
    Plan(PlanCommand),

    /// Describe the pipeline, its rules and diagnostic codes
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
