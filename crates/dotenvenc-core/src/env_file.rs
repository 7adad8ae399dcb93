//! Env-file parsing and output formatting.
//!
//! Grammar, one assignment per line (LF or CRLF):
//!
//! - `KEY=VALUE`, optionally prefixed with `export `; `KEY` is
//!   `[A-Za-z_][A-Za-z0-9_]*`
//! - unquoted values are trimmed; a `#` at the start of the value or after
//!   whitespace begins a comment
//! - `'single'` and `` `backtick` `` values are literal
//! - `"double"` values expand `\n`, `\r`, `\t`, `\"` and `\\`
//! - any quote may span several lines; the value runs to the matching
//!   closing quote and the rest of that line is ignored
//! - a leading UTF-8 byte-order mark is ignored
//! - blank lines, `#` comments and anything that is not an assignment are
//!   skipped
//!
//! A later assignment to the same key replaces the value but keeps the
//! position of the first one.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered map of variable name to value with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EnvMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for EnvMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse env-file bytes into an [`EnvMap`].
///
/// Invalid UTF-8 is decoded lossily. Input with no valid assignment (empty,
/// comments only, or bytes decrypted with the wrong key) yields an empty map.
///
/// # Examples
///
/// ```
/// use dotenvenc_core::parse;
///
/// let env = parse(b"# db\nDB_HOST=localhost\nDB_PASS='p@ss=word'\n");
/// assert_eq!(env.get("DB_HOST"), Some("localhost"));
/// assert_eq!(env.get("DB_PASS"), Some("p@ss=word"));
/// ```
pub fn parse(bytes: &[u8]) -> EnvMap {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded
        .strip_prefix('\u{feff}')
        .unwrap_or(&*decoded)
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let mut map = EnvMap::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let line_end = end_of_line(&text, cursor);
        let line = &text[cursor..line_end];
        let mut consumed_to = line_end;

        if let Some((key, value_offset)) = split_assignment(line) {
            let (value, value_end) = read_value(&text, cursor + value_offset, line_end);
            map.insert(key, value);
            consumed_to = value_end;
        }

        cursor = consumed_to + 1;
    }

    map
}

/// `KEY="VALUE"` with embedded double quotes escaped.
pub fn format_assignment(key: &str, value: &str) -> String {
    format!("{}=\"{}\"", key, escape_double_quotes(value))
}

/// `export KEY="VALUE";` with embedded double quotes escaped.
pub fn format_export(key: &str, value: &str) -> String {
    format!("export {}=\"{}\";", key, escape_double_quotes(value))
}

fn escape_double_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn end_of_line(text: &str, from: usize) -> usize {
    text[from..]
        .find('\n')
        .map_or(text.len(), |offset| from + offset)
}

/// Returns the key and the byte offset just past `=` within `line`.
fn split_assignment(line: &str) -> Option<(&str, usize)> {
    let mut offset = line.len() - line.trim_start().len();
    let mut rest = &line[offset..];
    if rest.starts_with('#') {
        return None;
    }

    if let Some(stripped) = rest.strip_prefix("export") {
        if stripped.starts_with(|c: char| c == ' ' || c == '\t') {
            let body = stripped.trim_start();
            offset += rest.len() - body.len();
            rest = body;
        }
    }

    let eq = rest.find('=')?;
    let key = rest[..eq].trim_end();
    if !is_valid_key(key) {
        return None;
    }
    Some((key, offset + eq + 1))
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Read the value starting at `start`. Returns the value and the end of the
/// last line it occupies.
fn read_value(text: &str, start: usize, line_end: usize) -> (String, usize) {
    let raw = &text[start..line_end];
    let value_start = start + (raw.len() - raw.trim_start().len());

    if let Some(quote @ ('"' | '\'' | '`')) = text[value_start..].chars().next() {
        let body_start = value_start + 1;
        if let Some(close) = find_closing_quote(&text[body_start..], quote) {
            let body = &text[body_start..body_start + close];
            let value = if quote == '"' {
                unescape(body)
            } else {
                body.to_string()
            };
            return (value, end_of_line(text, body_start + close + 1));
        }
    }

    (unquoted(raw), line_end)
}

fn find_closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (position, c) in text.char_indices() {
        if quote == '"' && c == '\\' && !escaped {
            escaped = true;
            continue;
        }
        if c == quote && !escaped {
            return Some(position);
        }
        escaped = false;
    }
    None
}

fn unescape(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

fn unquoted(raw: &str) -> String {
    let mut previous_is_space = true;
    let mut cut = raw.len();
    for (position, c) in raw.char_indices() {
        if c == '#' && previous_is_space {
            cut = position;
            break;
        }
        previous_is_space = c.is_whitespace();
    }
    raw[..cut].trim().to_string()
}
