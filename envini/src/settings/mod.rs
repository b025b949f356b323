//! Run settings for envini.
//!
//! Settings are resolved from three layers (highest precedence first):
//!
//! 1. Programmatic values (via [`SettingsBuilder`], fed by CLI flags)
//! 2. Environment variables (`ENVINI_*`)
//! 3. Built-in defaults, with the key prefix derived from the target name
//!
//! # Examples
//!
//! ```
//! use envini::settings::{OutputMode, SettingsBuilder};
//! use envini::DeletePolicy;
//!
//! let settings = SettingsBuilder::new("/etc/app/app.ini")
//!     .skip_env()
//!     .replace(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.prefix, "app_ini");
//! assert_eq!(settings.output, OutputMode::Replace);
//! assert_eq!(settings.delete_policy, DeletePolicy::Strict);
//! ```

pub mod builder;
pub mod environment;
pub mod schema;
pub mod validator;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use schema::{MalformedPolicy, OutputMode, Settings, SettingsOverrides};
pub use validator::SettingsValidator;
