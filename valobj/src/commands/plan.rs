use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use valobj_manifest::ValobjToml;

use super::UnwrapOrExit;
use crate::reports::{Report, TerminalOutput};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct PlanCommand {
    /// Path to valobj.toml (defaults to ./valobj.toml)
    #[arg(short, long, default_value = "valobj.toml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write per-phase JSON snapshots of every value object to this directory
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let file = ValobjToml::open(&self.config).unwrap_or_exit();
        let report = crate::ops::plan(
            file.manifest(),
            &self.config,
            self.snapshot_dir.as_deref(),
        )?;

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => {
                let json =
                    serde_json::to_string_pretty(&report).wrap_err("Failed to serialize plans")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}
