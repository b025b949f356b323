//! Settings types.

use std::path::PathBuf;

use crate::merger::DeletePolicy;

/// Where the patched document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Print the document to standard output.
    #[default]
    Stdout,
    /// Atomically replace the target file.
    Replace,
}

/// What happens to variables that carry the prefix but do not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the run on the first malformed name.
    #[default]
    Abort,
    /// Warn and carry on without the variable.
    Skip,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The INI file to patch.
    pub target: PathBuf,
    /// Prefix selecting the environment variables to consider.
    pub prefix: String,
    /// Output destination.
    pub output: OutputMode,
    /// Treatment of deletes that reference absent options.
    pub delete_policy: DeletePolicy,
    /// Treatment of malformed variable names.
    pub malformed: MalformedPolicy,
}

/// A partial layer of settings; `None` leaves the lower layer's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Explicit key prefix.
    pub prefix: Option<String>,
    /// Replace the target in place.
    pub replace: Option<bool>,
    /// Use the lenient delete policy.
    pub lenient: Option<bool>,
    /// Skip malformed variable names.
    pub ignore_malformed: Option<bool>,
}

impl SettingsOverrides {
    /// Overlays `higher` onto `self`; values set in `higher` win.
    pub fn merge_from(&mut self, higher: &Self) {
        if higher.prefix.is_some() {
            self.prefix.clone_from(&higher.prefix);
        }
        if higher.replace.is_some() {
            self.replace = higher.replace;
        }
        if higher.lenient.is_some() {
            self.lenient = higher.lenient;
        }
        if higher.ignore_malformed.is_some() {
            self.ignore_malformed = higher.ignore_malformed;
        }
    }
}
