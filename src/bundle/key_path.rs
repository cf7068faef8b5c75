//! Key path grammar for bundle lookups.
//!
//! A path is a list of segments joined by the key separator, with optional
//! `[n]` suffixes that index into lists and option pairs:
//!
//! - `tripPlanner.labels.panelTitle`
//! - `time.months[0]`
//! - `tripPlanner.mode[0][1]` (label of the first mode option)
//! - `tripPlanner.msgcodes[440]` (on a bundle, the index is read as a key)

use thiserror::Error;

/// Separator used when none is configured.
pub const DEFAULT_KEY_SEPARATOR: &str = ".";

/// Errors produced while parsing a key path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("Key path is empty")]
    Empty,

    #[error("Key path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("Key path '{path}' has an unclosed '['")]
    UnclosedBracket { path: String },

    #[error("Key path '{path}' has an invalid index '{index}': only digits are allowed")]
    InvalidIndex { path: String, index: String },

    #[error("Key path '{path}' has unexpected text around ']'")]
    TrailingText { path: String },
}

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Plain key, e.g. `labels`.
    Key(String),
    /// Bracketed digits, e.g. `[3]`.
    Index(String),
}

impl Segment {
    /// Raw text of the segment, used as a key when stepping into a bundle.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Key(text) | Self::Index(text) => text,
        }
    }

    /// Numeric position when the segment is used on a list or pair.
    ///
    /// Only canonical decimals count: ASCII digits without a sign or a
    /// leading zero. Plain keys of that form are accepted as well, so
    /// `time.months.0` and `time.months[0]` are equivalent.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        let text = self.text();
        let canonical = !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && (text == "0" || !text.starts_with('0'));

        if canonical { text.parse().ok() } else { None }
    }

    /// Appends this segment to a rendered path.
    pub(crate) fn append_to(&self, out: &mut String, separator: &str) {
        match self {
            Self::Key(key) => {
                if !out.is_empty() {
                    out.push_str(separator);
                }
                out.push_str(key);
            }
            Self::Index(index) => {
                out.push('[');
                out.push_str(index);
                out.push(']');
            }
        }
    }
}

/// A parsed key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parses `path` using `separator` between keys.
    ///
    /// An empty separator disables splitting, so the whole text (minus any
    /// bracket suffixes) is a single key.
    pub fn parse(path: &str, separator: &str) -> Result<Self, KeyPathError> {
        if path.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let chunks: Vec<&str> =
            if separator.is_empty() { vec![path] } else { path.split(separator).collect() };

        let mut segments = Vec::new();
        for (position, chunk) in chunks.into_iter().enumerate() {
            parse_chunk(path, chunk, position == 0, &mut segments)?;
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders the path back to text with the given separator.
    #[must_use]
    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.append_to(&mut out, separator);
        }
        out
    }
}

/// Parses one separator-delimited chunk such as `months` or `mode[0][1]`.
fn parse_chunk(
    path: &str,
    chunk: &str,
    first: bool,
    segments: &mut Vec<Segment>,
) -> Result<(), KeyPathError> {
    let (name, mut rest) = match chunk.split_once('[') {
        Some((name, rest)) => (name, Some(rest)),
        None => (chunk, None),
    };

    if name.contains(']') {
        return Err(KeyPathError::TrailingText { path: path.to_string() });
    }

    if name.is_empty() {
        // `[0]` is only allowed to open the path, never after a separator.
        if rest.is_none() || !first {
            return Err(KeyPathError::EmptySegment { path: path.to_string() });
        }
    } else {
        segments.push(Segment::Key(name.to_string()));
    }

    while let Some(after_open) = rest {
        let Some((index, after_close)) = after_open.split_once(']') else {
            return Err(KeyPathError::UnclosedBracket { path: path.to_string() });
        };

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyPathError::InvalidIndex {
                path: path.to_string(),
                index: index.to_string(),
            });
        }
        segments.push(Segment::Index(index.to_string()));

        rest = if after_close.is_empty() {
            None
        } else if let Some(next) = after_close.strip_prefix('[') {
            Some(next)
        } else {
            return Err(KeyPathError::TrailingText { path: path.to_string() });
        };
    }

    Ok(())
}

/// Checks if `child_key` is a child of `parent_key`.
///
/// Supports both separator-based (e.g., `time.months`) and array notation (e.g., `months[0]`).
#[must_use]
pub fn is_child_key(child_key: &str, parent_key: &str, separator: &str) -> bool {
    let Some(remainder) = child_key.strip_prefix(parent_key) else {
        return false;
    };

    !remainder.is_empty()
        && ((!separator.is_empty() && remainder.starts_with(separator))
            || remainder.starts_with('['))
}
