use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use valobj_manifest::ValobjToml;

use super::UnwrapOrExit;
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to valobj.toml (defaults to ./valobj.toml)
    #[arg(short, long, default_value = "valobj.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = ValobjToml::open(&self.config).unwrap_or_exit();
        let report = crate::ops::check(file.manifest(), &self.config)?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
