//! Line-oriented INI parser producing an [`IniDocument`].

use super::{option_key, Entry, IniDocument, Line, Section, COMMENT_PREFIXES};
use crate::error::{Error, Result};
const DELIMITERS: [char; 2] = ['=', ':'];

pub(super) fn parse(text: &str) -> Result<IniDocument> {
    let mut doc = IniDocument::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            push_line(&mut doc, Line::Blank(raw.to_string()));
            continue;
        }

        if trimmed.starts_with(COMMENT_PREFIXES) {
            push_line(&mut doc, Line::Comment(raw.to_string()));
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        if indent > 0 {
            if let Some(entry) = continued_entry(&mut doc, indent) {
                entry.value.push('\n');
                entry.value.push_str(trimmed);
                if let Some(lines) = entry.raw.as_mut() {
                    lines.push(raw.to_string());
                }
                continue;
            }
        }

        if trimmed.starts_with('[') {
            let section = parse_header(raw, trimmed, line_no)?;
            if doc.has_section(&section.name) {
                return Err(error(
                    line_no,
                    format!("duplicate section '{}'", section.name),
                ));
            }
            doc.index.insert(section.name.clone(), doc.sections.len());
            doc.sections.push(section);
            continue;
        }

        let entry = parse_entry(raw, trimmed, indent, line_no)?;
        let Some(section) = doc.sections.last_mut() else {
            return Err(error(
                line_no,
                format!("option '{}' outside of any section", entry.name),
            ));
        };
        if section.entry(&entry.key).is_some() {
            return Err(error(
                line_no,
                format!(
                    "duplicate option '{}' in section '{}'",
                    entry.name, section.name
                ),
            ));
        }
        section.lines.push(Line::Entry(entry));
    }

    Ok(doc)
}

fn error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn push_line(doc: &mut IniDocument, line: Line) {
    match doc.sections.last_mut() {
        Some(section) => section.lines.push(line),
        None => doc.preamble.push(line),
    }
}

// A line indented deeper than the entry directly above it continues that
// entry's value.
fn continued_entry(doc: &mut IniDocument, indent: usize) -> Option<&mut Entry> {
    match doc.sections.last_mut()?.lines.last_mut()? {
        Line::Entry(entry) if indent > entry.indent => Some(entry),
        _ => None,
    }
}

fn parse_header(raw: &str, trimmed: &str, line_no: usize) -> Result<Section> {
    // Text after the closing bracket (e.g. a trailing comment) is ignored.
    let close = trimmed
        .rfind(']')
        .ok_or_else(|| error(line_no, "unterminated section header"))?;
    let name = trimmed[1..close].trim();
    if name.is_empty() {
        return Err(error(line_no, "empty section name"));
    }
    Ok(Section {
        name: name.to_string(),
        header: Some(raw.to_string()),
        lines: Vec::new(),
    })
}

fn parse_entry(raw: &str, trimmed: &str, indent: usize, line_no: usize) -> Result<Entry> {
    let (name, value) = trimmed
        .split_once(DELIMITERS)
        .ok_or_else(|| error(line_no, "expected 'name = value' or a section header"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(error(line_no, "empty option name"));
    }
    Ok(Entry {
        name: name.to_string(),
        key: option_key(name),
        value: value.trim().to_string(),
        indent,
        raw: Some(vec![raw.to_string()]),
    })
}
