//! Command to patch an INI file from the process environment.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use envini::{EnvSnapshot, PatchOperation, SettingsBuilder};
use std::io;
use std::path::PathBuf;

/// Apply environment directives to an INI file.
#[derive(Args)]
pub struct PatchCommand {
    /// INI file to patch (a missing file is treated as empty)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Atomically replace TARGET instead of printing to stdout
    #[arg(short, long)]
    pub replace: bool,

    /// Variable name prefix (default: $ENVINI_KEYPREFIX, then derived from the TARGET file name)
    #[arg(short, long, value_name = "PREFIX")]
    pub keyprefix: Option<String>,

    /// Treat deletes of absent options as no-ops
    #[arg(short, long)]
    pub lenient: bool,

    /// Skip malformed variable names with a warning instead of aborting
    #[arg(long)]
    pub ignore_malformed: bool,
}

impl PatchCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = &global.logger;

        let settings = SettingsBuilder::new(self.target)
            .prefix(self.keyprefix)
            .replace(self.replace)
            .lenient(self.lenient)
            .ignore_malformed(self.ignore_malformed)
            .build()?;
        logger.debug(&format!(
            "patching {} with prefix '{}'",
            settings.target.display(),
            settings.prefix
        ));

        let snapshot = EnvSnapshot::capture();
        let outcome =
            PatchOperation::new(&settings, logger).run(&snapshot, &mut io::stdout().lock())?;

        logger.info(&format!(
            "{} change(s) applied, {} variable(s) skipped",
            outcome.applied, outcome.skipped
        ));
        Ok(())
    }
}
