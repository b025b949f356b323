//! Application of directives to a document.
//!
//! The merger mutates an [`IniDocument`] in place and reports one audit entry
//! per mutation. Missing sections are created on demand for set directives;
//! how a delete of an absent option is treated depends on the
//! [`DeletePolicy`].

use std::fmt;

use crate::decoder::Directive;
use crate::document::IniDocument;
use crate::error::{Error, Result};
use crate::logging::Logger;

/// Marker logged in place of a previous value that did not exist.
pub const UNSET: &str = "<unset>";

/// How deleting an absent option is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Deleting something absent is an error.
    #[default]
    Strict,
    /// Deleting something absent is a no-op.
    Lenient,
}

/// One mutation performed by the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEntry {
    /// An option was created or overwritten.
    Set {
        /// Section written to.
        section: String,
        /// Option written to.
        option: String,
        /// The new value.
        value: String,
        /// The effective value before the write, if any.
        previous: Option<String>,
    },
    /// An option was removed.
    DeleteOption {
        /// Section the option was removed from.
        section: String,
        /// Removed option.
        option: String,
        /// The removed value.
        previous: String,
    },
    /// A section was removed with all its options.
    DeleteSection {
        /// Removed section.
        section: String,
        /// Number of options the section held.
        options: usize,
    },
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set {
                section,
                option,
                value,
                previous,
            } => write!(
                f,
                "set {section}/{option} = {value} [was: {}]",
                previous.as_deref().unwrap_or(UNSET)
            ),
            Self::DeleteOption {
                section,
                option,
                previous,
            } => write!(f, "delete option {section}/{option} [was: {previous}]"),
            Self::DeleteSection { section, options } => {
                write!(f, "delete section {section} ({options} options)")
            }
        }
    }
}

/// Outcome of applying a batch of directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Number of directives that changed the document.
    pub applied: usize,
    /// Audit trail in application order.
    pub audit: Vec<AuditEntry>,
}

impl ApplyReport {
    /// Records the outcome of one directive.
    pub fn record(&mut self, entry: Option<AuditEntry>) {
        if let Some(entry) = entry {
            self.applied += 1;
            self.audit.push(entry);
        }
    }
}

/// Applies directives to a document.
///
/// # Examples
///
/// ```
/// use envini::{ConfigMerger, DeletePolicy, Directive, IniDocument, Logger};
///
/// let logger = Logger::default();
/// let merger = ConfigMerger::new(&logger, DeletePolicy::Strict);
/// let mut doc = IniDocument::parse("[web]\nport = 8080\n").unwrap();
///
/// let report = merger
///     .apply(
///         &mut doc,
///         &[Directive::Set {
///             section: "web".into(),
///             option: "port".into(),
///             value: "9090".into(),
///         }],
///     )
///     .unwrap();
///
/// assert_eq!(report.applied, 1);
/// assert_eq!(doc.get("web", "port"), Some("9090"));
/// assert_eq!(report.audit[0].to_string(), "set web/port = 9090 [was: 8080]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigMerger<'a> {
    logger: &'a Logger,
    policy: DeletePolicy,
}

impl<'a> ConfigMerger<'a> {
    /// Creates a merger that reports through `logger`.
    #[must_use]
    pub const fn new(logger: &'a Logger, policy: DeletePolicy) -> Self {
        Self { logger, policy }
    }

    /// The configured delete policy.
    #[must_use]
    pub const fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// Applies directives in order, stopping at the first failure.
    ///
    /// Directives applied before a failure stay applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntry`] when a strict delete references an
    /// absent section or option.
    pub fn apply(&self, document: &mut IniDocument, directives: &[Directive]) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();
        for directive in directives {
            report.record(self.apply_one(document, directive)?);
        }
        Ok(report)
    }

    /// Applies a single directive.
    ///
    /// Returns the audit entry for a mutation, or `None` when the directive
    /// was a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntry`] when a strict delete references an
    /// absent section or option.
    pub fn apply_one(
        &self,
        document: &mut IniDocument,
        directive: &Directive,
    ) -> Result<Option<AuditEntry>> {
        let entry = match directive {
            Directive::Set {
                section,
                option,
                value,
            } => Some(Self::set(document, section, option, value)),
            Directive::DeleteOption { section, option } => {
                self.delete_option(document, section, option)?
            }
            Directive::DeleteSection { section } => self.delete_section(document, section),
        };

        if let Some(entry) = &entry {
            self.logger.info(&entry.to_string());
        }
        Ok(entry)
    }

    fn set(document: &mut IniDocument, section: &str, option: &str, value: &str) -> AuditEntry {
        let previous = document.get(section, option).map(str::to_string);
        document.set(section, option, value);
        AuditEntry::Set {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            previous,
        }
    }

    fn delete_option(
        &self,
        document: &mut IniDocument,
        section: &str,
        option: &str,
    ) -> Result<Option<AuditEntry>> {
        if let Some(previous) = document.remove_option(section, option) {
            return Ok(Some(AuditEntry::DeleteOption {
                section: section.to_string(),
                option: option.to_string(),
                previous,
            }));
        }

        match self.policy {
            DeletePolicy::Strict => Err(Error::MissingEntry {
                section: section.to_string(),
                option: Some(option.to_string()),
            }),
            DeletePolicy::Lenient => {
                self.logger
                    .debug(&format!("delete option {section}/{option}: not present"));
                Ok(None)
            }
        }
    }

    fn delete_section(&self, document: &mut IniDocument, section: &str) -> Option<AuditEntry> {
        match document.remove_section(section) {
            Some(options) => Some(AuditEntry::DeleteSection {
                section: section.to_string(),
                options,
            }),
            None => {
                self.logger
                    .debug(&format!("delete section {section}: not present"));
                None
            }
        }
    }
}
