//! CLI structure and argument definitions.
//!
//! envini has a single job, so there are no subcommands: the global
//! logging flags sit next to the patch arguments.

use crate::commands::PatchCommand;
use clap::Parser;

/// Patch an INI configuration file from environment variables.
///
/// Variables named `<PREFIX>__<SECTION>__<OPTION>` set an option,
/// `<PREFIX>__<SECTION>__<OPTION>__delete` removes it and
/// `<PREFIX>__<SECTION>____delete` removes a whole section.
#[derive(Parser)]
#[command(name = "envini")]
#[command(version, about = "Patch INI files from environment variables")]
pub struct Cli {
    /// Log every change (audit lines)
    #[arg(short, long)]
    pub verbose: bool,

    /// Log debug details
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress warnings and errors
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    #[command(flatten)]
    pub patch: PatchCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "envini",
            "-r",
            "-k",
            "MYAPP",
            "--lenient",
            "--ignore-malformed",
            "-v",
            "app.ini",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(!cli.debug);
        assert!(cli.patch.replace);
        assert!(cli.patch.lenient);
        assert!(cli.patch.ignore_malformed);
        assert_eq!(cli.patch.keyprefix.as_deref(), Some("MYAPP"));
        assert_eq!(cli.patch.target, PathBuf::from("app.ini"));
    }

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["envini"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["envini", "-q", "-v", "app.ini"]).is_err());
    }
}
