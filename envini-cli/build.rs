//! Build script for envini-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs and
/// src/commands/patch.rs.
fn build_cli() -> Command {
    Command::new("envini")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Patch INI files from environment variables")
        .long_about(
            "Reads TARGET, applies the set and delete directives encoded in \
             environment variable names, and prints the result or replaces \
             TARGET atomically.\n\n\
             PREFIX__SECTION__OPTION=value sets an option, \
             PREFIX__SECTION__OPTION__delete removes it and \
             PREFIX__SECTION____delete removes a whole section.",
        )
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("INI file to patch (a missing file is treated as empty)")
                .required(true),
        )
        .arg(
            Arg::new("replace")
                .short('r')
                .long("replace")
                .help("Atomically replace TARGET instead of printing to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keyprefix")
                .short('k')
                .long("keyprefix")
                .value_name("PREFIX")
                .help(
                    "Variable name prefix (default: $ENVINI_KEYPREFIX, then derived from the TARGET file name)",
                ),
        )
        .arg(
            Arg::new("lenient")
                .short('l')
                .long("lenient")
                .help("Treat deletes of absent options as no-ops")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-malformed")
                .long("ignore-malformed")
                .help("Skip malformed variable names with a warning instead of aborting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every change (audit lines)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Log debug details")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress warnings and errors")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("envini.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
