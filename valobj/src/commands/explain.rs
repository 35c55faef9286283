use clap::Args;
use eyre::{Result, eyre};
use valobj_codegen::pipeline::DiagnosticCode;

use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct ExplainCommand {
    /// Diagnostic code to explain, e.g. VOG017 (lists everything if omitted)
    pub code: Option<String>,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let code = self
            .code
            .as_deref()
            .map(|code| code.parse::<DiagnosticCode>().map_err(|e| eyre!(e)))
            .transpose()?;

        crate::ops::explain(code).render(&mut TerminalOutput::new());
        Ok(())
    }
}
