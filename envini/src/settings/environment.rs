//! Environment variable handling for settings overrides.
//!
//! `ENVINI_*` variables override the built-in defaults but are themselves
//! overridden by explicit (command-line) values.

use crate::error::{Error, Result};
use crate::settings::schema::SettingsOverrides;
use std::env;

/// Explicit key prefix.
pub const KEYPREFIX_ENV: &str = "ENVINI_KEYPREFIX";
/// Replace the target in place.
pub const REPLACE_ENV: &str = "ENVINI_REPLACE";
/// Use the lenient delete policy.
pub const LENIENT_ENV: &str = "ENVINI_LENIENT";
/// Skip malformed variable names.
pub const IGNORE_MALFORMED_ENV: &str = "ENVINI_IGNORE_MALFORMED";

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use envini::settings::{EnvironmentSettings, SettingsOverrides};
///
/// let mut overrides = SettingsOverrides::default();
/// EnvironmentSettings::apply_overrides(&mut overrides).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply `ENVINI_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognised value.
    pub fn apply_overrides(overrides: &mut SettingsOverrides) -> Result<()> {
        Self::apply_with(overrides, |name| env::var(name).ok())
    }

    /// Apply overrides using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognised value.
    pub fn apply_with<F>(overrides: &mut SettingsOverrides, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(KEYPREFIX_ENV) {
            if !prefix.is_empty() {
                overrides.prefix = Some(prefix);
            }
        }

        if let Some(val) = lookup(REPLACE_ENV) {
            overrides.replace = Some(Self::parse_bool(REPLACE_ENV, &val)?);
        }

        if let Some(val) = lookup(LENIENT_ENV) {
            overrides.lenient = Some(Self::parse_bool(LENIENT_ENV, &val)?);
        }

        if let Some(val) = lookup(IGNORE_MALFORMED_ENV) {
            overrides.ignore_malformed = Some(Self::parse_bool(IGNORE_MALFORMED_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
