//! The patch pipeline: load, decode, merge, emit.
//!
//! A run reads the target (a missing file is an empty document), decodes
//! every relevant variable of an environment snapshot, applies the
//! resulting directives in snapshot order and finally writes the document
//! to stdout or atomically over the target.

use std::io::Write;

use crate::decoder::{Directive, KeyDecoder};
use crate::document::IniDocument;
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::logging::Logger;
use crate::merger::{AuditEntry, ConfigMerger};
use crate::persist;
use crate::settings::{MalformedPolicy, OutputMode, Settings};

/// Result of a completed patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Number of directives that changed the document.
    pub applied: usize,
    /// Number of malformed variables skipped.
    pub skipped: usize,
    /// Audit trail in application order.
    pub audit: Vec<AuditEntry>,
    /// Whether the target file was replaced.
    pub replaced: bool,
}

/// One patch run over a target file.
///
/// # Examples
///
/// ```
/// use envini::{EnvSnapshot, Logger, PatchOperation, SettingsBuilder};
///
/// let dir = tempfile::tempdir().unwrap();
/// let target = dir.path().join("app.ini");
/// std::fs::write(&target, "[web]\nport = 8080\n").unwrap();
///
/// let settings = SettingsBuilder::new(&target)
///     .skip_env()
///     .prefix(Some("APP".into()))
///     .build()
///     .unwrap();
/// let snapshot = EnvSnapshot::from_pairs([("APP__web__port", "9090")]);
///
/// let logger = Logger::default();
/// let mut out = Vec::new();
/// let outcome = PatchOperation::new(&settings, &logger)
///     .run(&snapshot, &mut out)
///     .unwrap();
///
/// assert_eq!(outcome.applied, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "[web]\nport = 9090\n");
/// ```
pub struct PatchOperation<'a> {
    settings: &'a Settings,
    logger: &'a Logger,
}

impl<'a> PatchOperation<'a> {
    /// Creates an operation for the given settings.
    #[must_use]
    pub const fn new(settings: &'a Settings, logger: &'a Logger) -> Self {
        Self { settings, logger }
    }

    /// Runs the pipeline against `snapshot`, writing to `stdout` unless
    /// the settings ask for in-place replacement.
    ///
    /// Nothing is written when any step fails.
    ///
    /// # Errors
    ///
    /// Returns the first error from loading, decoding (unless malformed
    /// names are skipped), merging or writing.
    pub fn run<W: Write>(&self, snapshot: &EnvSnapshot, stdout: &mut W) -> Result<PatchOutcome> {
        let target = &self.settings.target;
        self.logger
            .info(&format!("reading configuration from {}", target.display()));
        let mut document = IniDocument::load(target)?;

        let (directives, skipped) = self.decode(snapshot)?;
        self.logger.debug(&format!(
            "{} directive(s) for prefix '{}'",
            directives.len(),
            self.settings.prefix
        ));

        let merger = ConfigMerger::new(self.logger, self.settings.delete_policy);
        let report = merger.apply(&mut document, &directives)?;

        let replaced = match self.settings.output {
            OutputMode::Stdout => {
                persist::write_to(stdout, &document)?;
                false
            }
            OutputMode::Replace => {
                self.logger.warn(&format!("replacing {}", target.display()));
                persist::write_atomic(target, &document.to_string())?;
                true
            }
        };

        Ok(PatchOutcome {
            applied: report.applied,
            skipped,
            audit: report.audit,
            replaced,
        })
    }

    fn decode(&self, snapshot: &EnvSnapshot) -> Result<(Vec<Directive>, usize)> {
        let decoder = KeyDecoder::new(self.settings.prefix.as_str());
        let mut directives = Vec::new();
        let mut skipped = 0;

        for (name, decoded) in decoder.directives(snapshot) {
            match decoded {
                Ok(directive) => directives.push(directive),
                Err(e) => match self.settings.malformed {
                    MalformedPolicy::Abort => return Err(e),
                    MalformedPolicy::Skip => {
                        self.logger.warn(&format!("skipping {name}: {e}"));
                        skipped += 1;
                    }
                },
            }
        }
        Ok((directives, skipped))
    }
}
