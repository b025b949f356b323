//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and maps each failure class to its
//! own exit code.

use envini::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid arguments or settings.
    InvalidArguments(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Strict delete of an absent entry
    /// - 2: Command-line parse error (reported by clap)
    /// - 3: Malformed variable name or value
    /// - 4: Invalid arguments or settings
    /// - 5: I/O error (reading, replacing or writing output)
    /// - 6: Other library error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArguments(_) => 4,
            CliError::Library(lib_err) => match lib_err {
                LibError::MissingEntry { .. } => 1,
                LibError::MalformedKey { .. } | LibError::MalformedValue { .. } => 3,
                LibError::Validation { .. } => 4,
                LibError::SourceRead { .. } | LibError::Persist { .. } | LibError::Io(_) => 5,
                LibError::Parse { .. } => 6,
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Validation { field, message } => {
                CliError::InvalidArguments(format!("{field}: {message}"))
            }
            other => CliError::Library(other),
        }
    }
}
