//! Error types for the envini library.
//!
//! Decode failures, merge failures and persistence failures are separate
//! variants so callers can decide per variable or per directive whether to
//! abort a run or skip with a warning.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an envini error.
///
/// # Examples
///
/// ```
/// use envini::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the envini library.
#[derive(Debug, Error)]
pub enum Error {
    /// An environment variable carried the key prefix but did not match the
    /// variable name grammar.
    #[error("malformed key {name}: {reason}")]
    MalformedKey {
        /// The offending environment variable name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// An environment variable's value would not read back unchanged once
    /// written to the document.
    #[error("malformed value for {name}: {reason}")]
    MalformedValue {
        /// The environment variable carrying the value.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A strict delete referenced a section or option that does not exist.
    #[error("missing entry: {}", entry_label(section, option.as_deref()))]
    MissingEntry {
        /// The section that was referenced.
        section: String,
        /// The option that was referenced, if any.
        option: Option<String>,
    },

    /// The target file exists but could not be read or parsed.
    #[error("failed to read {}: {reason}", path.display())]
    SourceRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying failure.
        reason: String,
    },

    /// The document text is not valid INI.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// A description of the problem.
        message: String,
    },

    /// The patched document could not be persisted.
    #[error("failed to persist {}: {reason}", path.display())]
    Persist {
        /// The target that was being replaced.
        path: PathBuf,
        /// The underlying failure.
        reason: String,
    },

    /// A settings validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn entry_label(section: &str, option: Option<&str>) -> String {
    match option {
        Some(option) => format!("{section}/{option}"),
        None => section.to_string(),
    }
}

impl Error {
    /// Check if error came from decoding an environment variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use envini::Error;
    ///
    /// let err = Error::MalformedKey {
    ///     name: "APP__web".to_string(),
    ///     reason: "expected 3 or 4 fields, found 2".to_string(),
    /// };
    /// assert!(err.is_decode_error());
    /// ```
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::MalformedKey { .. } | Self::MalformedValue { .. })
    }

    /// Check if error came from applying a directive to a document.
    #[must_use]
    pub fn is_merge_error(&self) -> bool {
        matches!(self, Self::MissingEntry { .. })
    }

    /// Check if error is related to reading or writing the target file.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Self::SourceRead { .. } | Self::Persist { .. } | Self::Io(_)
        )
    }
}
