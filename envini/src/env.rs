//! Environment snapshots.
//!
//! The environment is read exactly once per run. Entries are kept ordered by
//! variable name so the order in which directives are applied does not depend
//! on the platform's enumeration order.

use std::collections::BTreeMap;
use std::env;

/// An ordered, immutable copy of environment variables.
///
/// # Examples
///
/// ```
/// use envini::EnvSnapshot;
///
/// let snapshot = EnvSnapshot::from_pairs([("B", "2"), ("A", "1")]);
/// let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode cannot be mapped to
    /// INI text and are skipped with a warning.
    #[must_use]
    pub fn capture() -> Self {
        let mut vars = BTreeMap::new();
        for (name, value) in env::vars_os() {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    vars.insert(name, value);
                }
                (name, _) => {
                    let shown = match name {
                        Ok(name) => name,
                        Err(raw) => raw.to_string_lossy().into_owned(),
                    };
                    log::warn!("skipping non-unicode environment variable {shown}");
                }
            }
        }
        Self { vars }
    }

    /// Builds a snapshot from explicit name/value pairs.
    ///
    /// Later duplicates replace earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a single variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Iterates variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
