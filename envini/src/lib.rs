#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # envini
//!
//! A library for patching INI configuration files from environment
//! variables.
//!
//! Variables named `<prefix>__<section>__<option>` set an option, and the
//! `__delete` suffix removes an option or (with an empty option field) a
//! whole section. Untouched parts of the document keep their exact text.
//!
//! ## Core Types
//!
//! - [`KeyDecoder`] and [`Directive`]: Variable name decoding
//! - [`IniDocument`]: Minimal-diff INI document model
//! - [`ConfigMerger`] and [`DeletePolicy`]: Directive application
//! - [`PatchOperation`]: The full load, merge and write pipeline
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use envini::{ConfigMerger, DeletePolicy, EnvSnapshot, IniDocument, KeyDecoder, Logger};
//!
//! let snapshot = EnvSnapshot::from_pairs([
//!     ("APP__db__host", "db.internal"),
//!     ("APP__cache____delete", ""),
//!     ("PATH", "/usr/bin"),
//! ]);
//!
//! let decoder = KeyDecoder::new("APP");
//! let directives = decoder
//!     .directives(&snapshot)
//!     .map(|(_, d)| d)
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let mut doc = IniDocument::parse("[db]\nhost = localhost\n\n[cache]\nttl = 60\n").unwrap();
//! let logger = Logger::default();
//! ConfigMerger::new(&logger, DeletePolicy::Strict)
//!     .apply(&mut doc, &directives)
//!     .unwrap();
//!
//! assert_eq!(doc.to_string(), "[db]\nhost = db.internal\n\n");
//! ```

pub mod decoder;
pub mod document;
pub mod env;
pub mod error;
pub mod logging;
pub mod merger;
pub mod operations;
pub mod persist;
pub mod settings;

// Re-export key types at crate root for convenience
pub use decoder::{derive_prefix, Action, Directive, KeyDecoder};
pub use document::{IniDocument, DEFAULT_SECTION};
pub use env::EnvSnapshot;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use merger::{ApplyReport, AuditEntry, ConfigMerger, DeletePolicy};
pub use operations::{PatchOperation, PatchOutcome};
pub use settings::{Settings, SettingsBuilder};
