//! Builder for resolving run settings from their layers.

use std::path::PathBuf;

use crate::decoder::derive_prefix;
use crate::error::Result;
use crate::merger::DeletePolicy;
use crate::settings::environment::EnvironmentSettings;
use crate::settings::schema::{MalformedPolicy, OutputMode, Settings, SettingsOverrides};
use crate::settings::validator::SettingsValidator;

/// Builder for constructing [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    target: PathBuf,
    explicit: SettingsOverrides,
    skip_env: bool,
}

impl SettingsBuilder {
    /// Start building settings for the given target file.
    #[must_use]
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            explicit: SettingsOverrides::default(),
            skip_env: false,
        }
    }

    /// Set an explicit key prefix. `None` keeps the lower layers' choice.
    #[must_use]
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        if prefix.is_some() {
            self.explicit.prefix = prefix;
        }
        self
    }

    /// Replace the target in place instead of printing to stdout.
    ///
    /// Only `true` is treated as explicit, so an absent CLI flag does not
    /// mask an `ENVINI_REPLACE` setting.
    #[must_use]
    pub fn replace(mut self, replace: bool) -> Self {
        if replace {
            self.explicit.replace = Some(true);
        }
        self
    }

    /// Use the lenient delete policy.
    #[must_use]
    pub fn lenient(mut self, lenient: bool) -> Self {
        if lenient {
            self.explicit.lenient = Some(true);
        }
        self
    }

    /// Skip malformed variable names instead of aborting.
    #[must_use]
    pub fn ignore_malformed(mut self, ignore: bool) -> Self {
        if ignore {
            self.explicit.ignore_malformed = Some(true);
        }
        self
    }

    /// Ignore `ENVINI_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Resolve and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an `ENVINI_*` variable is invalid or the
    /// resolved settings fail validation.
    pub fn build(self) -> Result<Settings> {
        let mut layers = SettingsOverrides::default();
        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut layers)?;
        }
        layers.merge_from(&self.explicit);

        let prefix = layers
            .prefix
            .unwrap_or_else(|| derive_prefix(&self.target));

        let settings = Settings {
            target: self.target,
            prefix,
            output: if layers.replace.unwrap_or(false) {
                OutputMode::Replace
            } else {
                OutputMode::Stdout
            },
            delete_policy: if layers.lenient.unwrap_or(false) {
                DeletePolicy::Lenient
            } else {
                DeletePolicy::Strict
            },
            malformed: if layers.ignore_malformed.unwrap_or(false) {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Abort
            },
        };

        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}
