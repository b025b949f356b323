//! Utility types shared by CLI commands.

use envini::Logger;

/// Global CLI options shared across commands.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// Logger resolved from the verbosity flags and `ENVINI_LOG_MODE`.
    pub logger: Logger,
}

impl GlobalOptions {
    /// Resolves the logger for the given flags.
    pub fn new(verbose: bool, debug: bool, quiet: bool) -> Self {
        Self {
            logger: envini::init_logger(verbose, debug, quiet),
        }
    }
}
