//! Settings validation.

use crate::decoder::DELIMITER;
use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Validates resolved settings before a run.
///
/// # Examples
///
/// ```
/// use envini::settings::{MalformedPolicy, OutputMode, Settings, SettingsValidator};
/// use envini::DeletePolicy;
///
/// let settings = Settings {
///     target: "app.ini".into(),
///     prefix: "APP".into(),
///     output: OutputMode::Stdout,
///     delete_policy: DeletePolicy::Strict,
///     malformed: MalformedPolicy::Abort,
/// };
/// SettingsValidator::validate(&settings).unwrap();
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate a complete set of settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the offending field.
    pub fn validate(settings: &Settings) -> Result<()> {
        Self::validate_prefix(&settings.prefix)?;

        if settings.target.file_name().is_none() {
            return Err(Error::Validation {
                field: "target".into(),
                message: format!("'{}' does not name a file", settings.target.display()),
            });
        }

        if settings.target.is_dir() {
            return Err(Error::Validation {
                field: "target".into(),
                message: format!("'{}' is a directory", settings.target.display()),
            });
        }

        Ok(())
    }

    /// Validate a key prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty (every variable would match)
    /// or contains the field delimiter (names could never decode).
    pub fn validate_prefix(prefix: &str) -> Result<()> {
        if prefix.is_empty() {
            return Err(Error::Validation {
                field: "prefix".into(),
                message: "key prefix must not be empty".into(),
            });
        }
        if prefix.contains(DELIMITER) {
            return Err(Error::Validation {
                field: "prefix".into(),
                message: format!("key prefix '{prefix}' must not contain '{DELIMITER}'"),
            });
        }
        Ok(())
    }
}
