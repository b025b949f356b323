//! Decoding of environment variable names into directives.
//!
//! Names are split on the `__` delimiter (single underscores stay available
//! for section and option names):
//!
//! | variable name                             | directive       |
//! |-------------------------------------------|-----------------|
//! | `<prefix>__<section>__<option>`           | set             |
//! | `<prefix>__<section>__<option>__delete`   | delete option   |
//! | `<prefix>__<section>____delete`           | delete section  |
//!
//! A name is considered only when it starts with the prefix followed by the
//! delimiter; the fields are split from what follows, so a prefix may itself
//! end in `_`. Set values must read back unchanged once written (see
//! [`check_value`]).

use std::fmt;
use std::path::Path;

use crate::document::check_value;
use crate::env::EnvSnapshot;
use crate::error::{Error, Result};

/// Field delimiter within variable names.
pub const DELIMITER: &str = "__";

/// Action keyword accepted in the fourth field.
pub const DELETE_ACTION: &str = "delete";

/// The kind of change a directive requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create or overwrite an option.
    Set,
    /// Remove a single option.
    DeleteOption,
    /// Remove a whole section.
    DeleteSection,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::DeleteOption => write!(f, "delete option"),
            Self::DeleteSection => write!(f, "delete section"),
        }
    }
}

/// One decoded change derived from an environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Set `section/option` to `value`.
    Set {
        /// Target section.
        section: String,
        /// Target option.
        option: String,
        /// New value, taken verbatim from the environment.
        value: String,
    },
    /// Remove `section/option`.
    DeleteOption {
        /// Target section.
        section: String,
        /// Target option.
        option: String,
    },
    /// Remove `section` and all of its options.
    DeleteSection {
        /// Target section.
        section: String,
    },
}

impl Directive {
    /// The action this directive performs.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Set { .. } => Action::Set,
            Self::DeleteOption { .. } => Action::DeleteOption,
            Self::DeleteSection { .. } => Action::DeleteSection,
        }
    }

    /// The section the directive targets.
    #[must_use]
    pub fn section(&self) -> &str {
        match self {
            Self::Set { section, .. }
            | Self::DeleteOption { section, .. }
            | Self::DeleteSection { section } => section,
        }
    }

    /// The option the directive targets, absent for section deletes.
    #[must_use]
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::Set { option, .. } | Self::DeleteOption { option, .. } => Some(option),
            Self::DeleteSection { .. } => None,
        }
    }

    /// The value to set, present only for `Set`.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.option() {
            Some(option) => write!(f, "{} {}/{}", self.action(), self.section(), option),
            None => write!(f, "{} {}", self.action(), self.section()),
        }
    }
}

/// Decodes prefixed environment variable names into [`Directive`]s.
///
/// # Examples
///
/// ```
/// use envini::{Directive, KeyDecoder};
///
/// let decoder = KeyDecoder::new("MYAPP");
/// let directive = decoder.decode("MYAPP__web__port", "9090").unwrap();
/// assert_eq!(
///     directive,
///     Some(Directive::Set {
///         section: "web".to_string(),
///         option: "port".to_string(),
///         value: "9090".to_string(),
///     })
/// );
///
/// // Unrelated variables are ignored.
/// assert_eq!(decoder.decode("HOME", "/root").unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    prefix: String,
}

impl KeyDecoder {
    /// Creates a decoder for the given key prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `name` belongs to this decoder's namespace.
    #[must_use]
    pub fn is_relevant(&self, name: &str) -> bool {
        match name.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(DELIMITER),
            None => false,
        }
    }

    /// Decodes one variable.
    ///
    /// Returns `Ok(None)` for variables outside the prefix namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] when a relevant name does not match
    /// the grammar, and [`Error::MalformedValue`] when a set value could not
    /// be written faithfully.
    pub fn decode(&self, name: &str, value: &str) -> Result<Option<Directive>> {
        if !self.is_relevant(name) {
            return Ok(None);
        }
        log::debug!("considering: {name}");

        // `is_relevant` guarantees the delimiter right after the prefix, so
        // only the remainder is split. A prefix ending in `_` stays intact.
        let Some(rest) = name[self.prefix.len()..].strip_prefix(DELIMITER) else {
            return Err(malformed(name, "expected 3 or 4 fields, found 1"));
        };
        let fields: Vec<&str> = rest.split(DELIMITER).collect();
        let directive = match fields.as_slice() {
            [section, option] => {
                check_section(name, section)?;
                check_option(name, option)?;
                check_value(value).map_err(|reason| Error::MalformedValue {
                    name: name.to_string(),
                    reason: reason.to_string(),
                })?;
                Directive::Set {
                    section: (*section).to_string(),
                    option: (*option).to_string(),
                    value: value.to_string(),
                }
            }
            [section, "", action] if *action == DELETE_ACTION => {
                check_section(name, section)?;
                Directive::DeleteSection {
                    section: (*section).to_string(),
                }
            }
            [section, option, action] if *action == DELETE_ACTION => {
                check_section(name, section)?;
                check_option(name, option)?;
                Directive::DeleteOption {
                    section: (*section).to_string(),
                    option: (*option).to_string(),
                }
            }
            [_, _, action] => {
                return Err(malformed(
                    name,
                    format!("unknown action '{action}' (expected '{DELETE_ACTION}')"),
                ));
            }
            _ => {
                return Err(malformed(
                    name,
                    format!("expected 3 or 4 fields, found {}", fields.len() + 1),
                ));
            }
        };

        Ok(Some(directive))
    }

    /// Decodes every relevant variable of a snapshot, in snapshot order.
    ///
    /// Each item carries the variable name so callers can report or skip
    /// individual failures.
    pub fn directives<'a>(
        &'a self,
        snapshot: &'a EnvSnapshot,
    ) -> impl Iterator<Item = (&'a str, Result<Directive>)> + 'a {
        snapshot.iter().filter_map(move |(name, value)| {
            match self.decode(name, value) {
                Ok(Some(directive)) => Some((name, Ok(directive))),
                Ok(None) => None,
                Err(e) => Some((name, Err(e))),
            }
        })
    }
}

fn malformed(name: &str, reason: impl Into<String>) -> Error {
    Error::MalformedKey {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn check_section(name: &str, section: &str) -> Result<()> {
    if section.is_empty() {
        return Err(malformed(name, "empty section name"));
    }
    if section.contains(['[', ']', '\n', '\r']) {
        return Err(malformed(
            name,
            format!("section name '{section}' contains a bracket or line break"),
        ));
    }
    Ok(())
}

fn check_option(name: &str, option: &str) -> Result<()> {
    if option.is_empty() {
        return Err(malformed(name, "empty option name"));
    }
    if option.contains(['=', ':', '\n', '\r']) {
        return Err(malformed(
            name,
            format!("option name '{option}' contains '=', ':' or a line break"),
        ));
    }
    if option.starts_with(['#', ';', '[']) {
        return Err(malformed(
            name,
            format!("option name '{option}' starts with a comment or header marker"),
        ));
    }
    if option.trim() != option {
        return Err(malformed(
            name,
            format!("option name '{option}' has surrounding whitespace"),
        ));
    }
    Ok(())
}

/// Derives the default key prefix from a target path.
///
/// Takes the final path component and replaces every character outside
/// `[A-Za-z0-9_]` with `_`. Paths without a final component yield an empty
/// prefix.
///
/// # Examples
///
/// ```
/// use envini::derive_prefix;
/// use std::path::Path;
///
/// assert_eq!(derive_prefix(Path::new("/etc/nova/nova.conf")), "nova_conf");
/// assert_eq!(derive_prefix(Path::new("my-app.v2.ini")), "my_app_v2_ini");
/// ```
#[must_use]
pub fn derive_prefix(path: &Path) -> String {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> KeyDecoder {
        KeyDecoder::new("MYAPP")
    }

    #[test]
    fn test_decode_set() {
        let d = decoder().decode("MYAPP__web__port", "9090").unwrap().unwrap();
        assert_eq!(d.action(), Action::Set);
        assert_eq!(d.section(), "web");
        assert_eq!(d.option(), Some("port"));
        assert_eq!(d.value(), Some("9090"));
    }

    #[test]
    fn test_decode_set_keeps_single_underscores() {
        let d = decoder()
            .decode("MYAPP__db_main__max_conn", "10")
            .unwrap()
            .unwrap();
        assert_eq!(d.section(), "db_main");
        assert_eq!(d.option(), Some("max_conn"));
    }

    #[test]
    fn test_decode_value_verbatim() {
        let d = decoder()
            .decode("MYAPP__web__banner", "spaced = out ; not a comment")
            .unwrap()
            .unwrap();
        assert_eq!(d.value(), Some("spaced = out ; not a comment"));
    }

    #[test]
    fn test_lossy_values_are_malformed() {
        let decoder = decoder();
        for value in ["line1\n\nline3", "a\n#b", "  spaced  "] {
            match decoder.decode("MYAPP__tls__cert", value).unwrap_err() {
                Error::MalformedValue { name, .. } => assert_eq!(name, "MYAPP__tls__cert"),
                other => panic!("unexpected error {other:?}"),
            }
        }
        // Deletes ignore the value.
        assert!(decoder.decode("MYAPP__tls__cert__delete", " x\n\n").is_ok());
    }

    #[test]
    fn test_prefix_ending_in_underscore() {
        let prefix = derive_prefix(Path::new("app.ini~"));
        assert_eq!(prefix, "app_ini_");
        let decoder = KeyDecoder::new(prefix);

        let d = decoder.decode("app_ini___web__port", "1").unwrap().unwrap();
        assert_eq!(d.section(), "web");
        assert_eq!(d.option(), Some("port"));

        let d = decoder
            .decode("app_ini___web____delete", "")
            .unwrap()
            .unwrap();
        assert_eq!(d, Directive::DeleteSection { section: "web".into() });

        let d = KeyDecoder::new("MY_")
            .decode("MY___db__user__delete", "")
            .unwrap()
            .unwrap();
        assert_eq!(d.section(), "db");
        assert_eq!(d.option(), Some("user"));
        assert_eq!(d.action(), Action::DeleteOption);

        assert_eq!(decoder.decode("app_ini__web__port", "1").unwrap(), None);
    }

    #[test]
    fn test_decode_delete_option() {
        let d = decoder()
            .decode("MYAPP__cache__ttl__delete", "1")
            .unwrap()
            .unwrap();
        assert_eq!(
            d,
            Directive::DeleteOption {
                section: "cache".to_string(),
                option: "ttl".to_string()
            }
        );
        assert_eq!(d.value(), None);
    }

    #[test]
    fn test_decode_delete_section() {
        let d = decoder()
            .decode("MYAPP__cache____delete", "")
            .unwrap()
            .unwrap();
        assert_eq!(
            d,
            Directive::DeleteSection {
                section: "cache".to_string()
            }
        );
        assert_eq!(d.option(), None);
    }

    #[test]
    fn test_decode_default_section() {
        let d = decoder()
            .decode("MYAPP__DEFAULT__debug", "true")
            .unwrap()
            .unwrap();
        assert_eq!(d.section(), "DEFAULT");
    }

    #[test]
    fn test_irrelevant_names_ignored() {
        let decoder = decoder();
        assert_eq!(decoder.decode("PATH", "/bin").unwrap(), None);
        assert_eq!(decoder.decode("OTHER__web__port", "1").unwrap(), None);
        assert_eq!(decoder.decode("MYAPPX__web__port", "1").unwrap(), None);
        assert_eq!(decoder.decode("myapp__web__port", "1").unwrap(), None);
        assert_eq!(decoder.decode("MYAPP_web__port", "1").unwrap(), None);
    }

    #[test]
    fn test_is_relevant() {
        let decoder = decoder();
        assert!(decoder.is_relevant("MYAPP"));
        assert!(decoder.is_relevant("MYAPP__a__b"));
        assert!(!decoder.is_relevant("MYAPPS__a__b"));
        assert!(!decoder.is_relevant("XMYAPP__a__b"));
    }

    #[test]
    fn test_wrong_field_counts_are_malformed() {
        let decoder = decoder();
        for name in [
            "MYAPP",
            "MYAPP__web",
            "MYAPP__web__port__delete__now",
            "MYAPP__a__b__c__d__e",
        ] {
            let err = decoder.decode(name, "x").unwrap_err();
            match err {
                Error::MalformedKey { name: n, reason } => {
                    assert_eq!(n, name);
                    assert!(reason.contains("fields"), "{reason}");
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_action_is_malformed() {
        let err = decoder()
            .decode("MYAPP__web__port__remove", "1")
            .unwrap_err();
        assert!(err.to_string().contains("unknown action 'remove'"));
    }

    #[test]
    fn test_empty_fields_are_malformed() {
        let decoder = decoder();
        assert!(decoder.decode("MYAPP____port", "1").is_err());
        assert!(decoder.decode("MYAPP__web__", "1").is_err());
        assert!(decoder.decode("MYAPP______delete", "1").is_err());
    }

    #[test]
    fn test_unrepresentable_names_are_malformed() {
        let decoder = decoder();
        assert!(decoder.decode("MYAPP__we]b__port", "1").is_err());
        assert!(decoder.decode("MYAPP__web__a=b", "1").is_err());
        assert!(decoder.decode("MYAPP__web__a:b", "1").is_err());
        assert!(decoder.decode("MYAPP__web__#port", "1").is_err());
        assert!(decoder.decode("MYAPP__web__ port", "1").is_err());
    }

    #[test]
    fn test_triple_underscore_split() {
        // "a___b" splits into "a" and "_b".
        let d = decoder()
            .decode("MYAPP__web___x", "1")
            .unwrap()
            .unwrap();
        assert_eq!(d.section(), "web");
        assert_eq!(d.option(), Some("_x"));
        assert_eq!(d.action(), Action::Set);
    }

    #[test]
    fn test_directives_over_snapshot() {
        let snapshot = EnvSnapshot::from_pairs([
            ("MYAPP__web__port", "9090"),
            ("HOME", "/root"),
            ("MYAPP__bad", "x"),
            ("MYAPP__web__host", "localhost"),
        ]);
        let decoder = decoder();
        let items: Vec<_> = decoder.directives(&snapshot).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, "MYAPP__bad");
        assert!(items[0].1.is_err());
        assert_eq!(items[1].0, "MYAPP__web__host");
        assert_eq!(items[2].0, "MYAPP__web__port");
    }

    #[test]
    fn test_directive_display() {
        let set = Directive::Set {
            section: "web".into(),
            option: "port".into(),
            value: "1".into(),
        };
        assert_eq!(set.to_string(), "set web/port");
        let del = Directive::DeleteSection {
            section: "web".into(),
        };
        assert_eq!(del.to_string(), "delete section web");
    }

    #[test]
    fn test_derive_prefix() {
        assert_eq!(derive_prefix(Path::new("app.ini")), "app_ini");
        assert_eq!(derive_prefix(Path::new("/etc/my-app/conf.d/x.y-z")), "x_y_z");
        assert_eq!(derive_prefix(Path::new("plain")), "plain");
        assert_eq!(derive_prefix(Path::new(".hidden")), "_hidden");
        assert_eq!(derive_prefix(Path::new("trailing.")), "trailing_");
        assert_eq!(derive_prefix(Path::new("caf\u{e9}.ini")), "caf__ini");
    }

    #[test]
    fn test_derive_prefix_without_file_name() {
        assert_eq!(derive_prefix(Path::new("/")), "");
        assert_eq!(derive_prefix(Path::new("")), "");
        assert_eq!(derive_prefix(Path::new("dir/..")), "");
    }
}
