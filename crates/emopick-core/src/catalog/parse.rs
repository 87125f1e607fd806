//! Loader for the pipe/newline emoji definition format.
//!
//! One record per line:
//!
//! ```text
//! # comment
//! 😀|Grinning Face|smile,happy,joy
//! 😐|Neutral Face
//! 🫥
//! ```
//!
//! The symbol is required; name and keyword list are optional. Values are
//! only trimmed here. Sanitizing happens when a catalog is built.

use serde::{Deserialize, Serialize};

/// One parsed definition line, before sanitizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl RawRecord {
    /// Creates a record from its three parts.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parses a definition block into records.
///
/// Blank lines, `#` comments and lines whose first segment is empty are
/// skipped. Segments past the third are ignored.
///
/// ```
/// use emopick_core::parse_emoji_block;
///
/// let records = parse_emoji_block("# faces\n😀|Grinning Face|smile,joy\n");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].keywords, vec!["smile", "joy"]);
/// ```
#[must_use]
pub fn parse_emoji_block(block: &str) -> Vec<RawRecord> {
    block.lines().filter_map(parse_line).collect()
}

/// Parses a single definition line. `None` for blanks, comments and
/// lines without a first segment.
pub(crate) fn parse_line(line: &str) -> Option<RawRecord> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut segments = line.split('|');
    let symbol = segments.next().map(str::trim).unwrap_or_default();
    if symbol.is_empty() {
        return None;
    }
    let name = segments.next().map(str::trim).unwrap_or_default();
    let keywords = segments.next().map(split_keywords).unwrap_or_default();

    Some(RawRecord {
        symbol: symbol.to_owned(),
        name: name.to_owned(),
        keywords,
    })
}

fn split_keywords(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_owned)
        .collect()
}
