//! Formatting-preserving INI document model.
//!
//! A document is an ordered list of nodes: a preamble of comments and blank
//! lines, then sections holding blank, comment and entry lines. Untouched
//! nodes render exactly as they were read; only entries that are set or
//! created are re-rendered. Mutations splice nodes in and out rather than
//! regenerating the file from a map.
//!
//! # Examples
//!
//! ```
//! use envini::IniDocument;
//!
//! let mut doc = IniDocument::parse("# app\n[web]\nport = 8080 ; keep\n").unwrap();
//! doc.set("web", "host", "localhost");
//! assert_eq!(
//!     doc.to_string(),
//!     "# app\n[web]\nport = 8080 ; keep\nhost = localhost\n"
//! );
//! ```

mod parser;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Name of the fallback section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank(String),
    Comment(String),
    Entry(Entry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    key: String,
    value: String,
    indent: usize,
    // Original text, dropped once the entry is modified.
    raw: Option<Vec<String>>,
}

impl Entry {
    fn new(option: &str, value: &str) -> Self {
        let key = option_key(option);
        Self {
            name: key.clone(),
            key,
            value: value.to_string(),
            indent: 0,
            raw: None,
        }
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.raw = None;
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw) = &self.raw {
            for line in raw {
                writeln!(f, "{line}")?;
            }
            return Ok(());
        }
        if self.value.is_empty() {
            return writeln!(f, "{} =", self.name);
        }
        writeln!(f, "{} = {}", self.name, self.value.replace('\n', "\n\t"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    header: Option<String>,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header: None,
            lines: Vec::new(),
        }
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|entry| entry.key == key)
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.lines.iter_mut().find_map(|line| match line {
            Line::Entry(entry) if entry.key == key => Some(entry),
            _ => None,
        })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| matches!(line, Line::Entry(entry) if entry.key == key))
    }

    // New entries go right after the last existing entry so trailing blank
    // lines and comments stay between this section and the next header.
    fn insertion_point(&self) -> usize {
        self.lines
            .iter()
            .rposition(|line| matches!(line, Line::Entry(_)))
            .map_or(0, |i| i + 1)
    }

    fn ends_with_blank(&self) -> bool {
        matches!(self.lines.last(), Some(Line::Blank(_)))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.header {
            Some(header) => writeln!(f, "{header}")?,
            None => writeln!(f, "[{}]", self.name)?,
        }
        for line in &self.lines {
            write_line(f, line)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, line: &Line) -> fmt::Result {
    match line {
        Line::Blank(raw) | Line::Comment(raw) => writeln!(f, "{raw}"),
        Line::Entry(entry) => write!(f, "{entry}"),
    }
}

/// Checks that `value` reads back unchanged once written.
///
/// Values span lines through tab-indented continuation lines, and the
/// parser trims every line. A value is therefore rejected when any of its
/// lines has surrounding whitespace, or when a line after the first is
/// blank or starts with a comment marker.
///
/// # Errors
///
/// Returns a short description of the first problem found.
///
/// # Examples
///
/// ```
/// use envini::document::check_value;
///
/// assert!(check_value("line one\nline two").is_ok());
/// assert!(check_value("a\n\nb").is_err());
/// assert!(check_value(" padded").is_err());
/// ```
pub fn check_value(value: &str) -> std::result::Result<(), &'static str> {
    for (i, line) in value.split('\n').enumerate() {
        if line.trim() != line {
            return Err("a line has leading or trailing whitespace");
        }
        if i > 0 && line.is_empty() {
            return Err("a continuation line is blank");
        }
        if i > 0 && line.starts_with(COMMENT_PREFIXES) {
            return Err("a continuation line starts with a comment marker");
        }
    }
    Ok(())
}

/// Option names are case-insensitive.
fn option_key(option: &str) -> String {
    option.to_lowercase()
}

/// An INI document that preserves the formatting of untouched content.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    preamble: Vec<Line>,
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl IniDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the offending line number when the text
    /// is not valid INI.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// Loads a document from disk.
    ///
    /// A missing file yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceRead`] when the file exists but cannot be read,
    /// is not UTF-8, or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} does not exist, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(Error::SourceRead {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        Self::parse(&text).map_err(|e| Error::SourceRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Whether the document holds no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.sections.is_empty()
    }

    /// Section names in document order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Whether a section node exists.
    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.index.contains_key(section)
    }

    /// Whether `section` holds `option` itself (inherited defaults excluded).
    #[must_use]
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.section(section)
            .is_some_and(|s| s.entry(&option_key(option)).is_some())
    }

    /// Looks up the effective value of `section/option`.
    ///
    /// Falls back to the `DEFAULT` section when the section does not define
    /// the option itself.
    #[must_use]
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        let key = option_key(option);
        self.section(section)
            .and_then(|s| s.entry(&key))
            .or_else(|| {
                if section == DEFAULT_SECTION {
                    None
                } else {
                    self.section(DEFAULT_SECTION).and_then(|s| s.entry(&key))
                }
            })
            .map(|entry| entry.value.as_str())
    }

    /// The options a section defines itself, in document order.
    #[must_use]
    pub fn options(&self, section: &str) -> Option<Vec<(&str, &str)>> {
        self.section(section).map(|s| {
            s.entries()
                .map(|e| (e.name.as_str(), e.value.as_str()))
                .collect()
        })
    }

    /// Creates `section` if it does not exist.
    ///
    /// Returns `true` when a section was created. `DEFAULT` is created at the
    /// front of the document, any other section at the end.
    pub fn ensure_section(&mut self, section: &str) -> bool {
        if self.has_section(section) {
            return false;
        }

        if section == DEFAULT_SECTION {
            let mut created = Section::new(section);
            if !self.sections.is_empty() {
                created.lines.push(Line::Blank(String::new()));
            }
            self.sections.insert(0, created);
            self.reindex();
        } else {
            self.separate_tail();
            self.index.insert(section.to_string(), self.sections.len());
            self.sections.push(Section::new(section));
        }
        true
    }

    /// Sets `section/option`, creating the section if needed.
    ///
    /// Returns the value the section previously held itself. The value is
    /// written as given; callers taking values from outside should run
    /// [`check_value`] first.
    pub fn set(&mut self, section: &str, option: &str, value: &str) -> Option<String> {
        self.ensure_section(section);
        let key = option_key(option);
        let Some(target) = self.section_mut(section) else {
            return None;
        };

        if let Some(entry) = target.entry_mut(&key) {
            let previous = std::mem::take(&mut entry.value);
            entry.set_value(value);
            return Some(previous);
        }

        let at = target.insertion_point();
        target.lines.insert(at, Line::Entry(Entry::new(option, value)));
        None
    }

    /// Removes `section/option`.
    ///
    /// Returns the removed value, or `None` if the section did not hold the
    /// option itself.
    pub fn remove_option(&mut self, section: &str, option: &str) -> Option<String> {
        let key = option_key(option);
        let target = self.section_mut(section)?;
        let at = target.position(&key)?;
        match target.lines.remove(at) {
            Line::Entry(entry) => Some(entry.value),
            _ => None,
        }
    }

    /// Removes `section` with all of its lines.
    ///
    /// Returns the number of options the section held, or `None` if it did
    /// not exist.
    pub fn remove_section(&mut self, section: &str) -> Option<usize> {
        let at = *self.index.get(section)?;
        let removed = self.sections.remove(at);
        self.reindex();
        Some(removed.entries().count())
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        let i = *self.index.get(name)?;
        self.sections.get_mut(i)
    }

    fn reindex(&mut self) {
        self.index = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
    }

    // Keeps a blank line between existing content and an appended section.
    fn separate_tail(&mut self) {
        match self.sections.last_mut() {
            Some(last) if !last.ends_with_blank() => last.lines.push(Line::Blank(String::new())),
            Some(_) => {}
            None => {
                let needs_blank = !self.preamble.is_empty()
                    && !matches!(self.preamble.last(), Some(Line::Blank(_)));
                if needs_blank {
                    self.preamble.push(Line::Blank(String::new()));
                }
            }
        }
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            write_line(f, line)?;
        }
        for section in &self.sections {
            write!(f, "{section}")?;
        }
        Ok(())
    }
}
