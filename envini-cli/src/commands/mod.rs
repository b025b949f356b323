//! CLI command implementations.
//!
//! - `patch`: Apply environment directives to an INI file

pub mod patch;

pub use patch::PatchCommand;
