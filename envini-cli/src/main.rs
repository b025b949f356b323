//! Main entry point for the envini CLI.
//!
//! envini reads an INI file, applies the set and delete directives found in
//! the environment, and prints the result or replaces the file in place.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let global = GlobalOptions::new(cli.verbose, cli.debug, cli.quiet);
    global.logger.install();

    // Handle errors and set exit code
    match cli.patch.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            global.logger.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
