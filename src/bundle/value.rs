//! Locale bundle values and lookup by key path.

use std::fmt;

use serde::Serialize;
use serde::ser::{
    SerializeMap,
    SerializeTuple,
};

use super::error::{
    BundleError,
    LookupError,
};
use super::key_path::{
    DEFAULT_KEY_SEPARATOR,
    KeyPath,
    KeyPathError,
    is_child_key,
};

/// One entry of a select control: the code sent to the planner and its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionPair {
    pub value: String,
    pub label: String,
}

impl OptionPair {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// Splits a comma-joined value such as `BUSISH,TRAINISH,WALK` into its codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.value.split(',').map(str::trim).filter(|code| !code.is_empty())
    }

    /// `0` is the value, `1` the label.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.value),
            1 => Some(&self.label),
            _ => None,
        }
    }
}

/// Serialized as `[value, label]`, the layout consumers index positionally.
impl Serialize for OptionPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.label)?;
        tuple.end()
    }
}

/// What kind of value sits at a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    List,
    Pairs,
    Pair,
    Bundle,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::List => "list",
            Self::Pairs => "option list",
            Self::Pair => "option pair",
            Self::Bundle => "bundle",
        };
        f.write_str(name)
    }
}

/// A value stored under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocaleValue {
    /// Literal string, possibly with inline markup.
    Text(String),
    /// Ordered strings, e.g. month abbreviations.
    List(Vec<String>),
    /// Ordered option pairs; order is the on-screen order.
    Pairs(Vec<OptionPair>),
    /// Nested section.
    Bundle(LocaleBundle),
}

impl LocaleValue {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Pairs(_) => ValueKind::Pairs,
            Self::Bundle(_) => ValueKind::Bundle,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pairs(&self) -> Option<&[OptionPair]> {
        match self {
            Self::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bundle(&self) -> Option<&LocaleBundle> {
        match self {
            Self::Bundle(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// Result of a successful lookup.
///
/// Indexing into a list or pair yields a borrowed element rather than a
/// whole [`LocaleValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved<'a> {
    Value(&'a LocaleValue),
    Pair(&'a OptionPair),
    Text(&'a str),
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Value(value) => value.kind(),
            Self::Pair(_) => ValueKind::Pair,
            Self::Text(_) => ValueKind::Text,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Self::Value(value) => value.as_text(),
            Self::Text(text) => Some(text),
            Self::Pair(_) => None,
        }
    }

    #[must_use]
    pub const fn as_pair(&self) -> Option<&'a OptionPair> {
        match *self {
            Self::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&'a LocaleValue> {
        match *self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Immutable, ordered mapping from keys to locale values.
///
/// Keys are unique within one bundle; construction rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleBundle {
    /// Entries in source order.
    entries: Vec<(String, LocaleValue)>,
}

impl LocaleBundle {
    /// Builds a bundle from entries in presentation order.
    pub fn from_entries(entries: Vec<(String, LocaleValue)>) -> Result<Self, BundleError> {
        for (position, (key, _)) in entries.iter().enumerate() {
            if entries.iter().take(position).any(|(earlier, _)| earlier == key) {
                return Err(BundleError::DuplicateKey { key: key.clone() });
            }
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct child keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LocaleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Direct child by exact key, without path parsing.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&LocaleValue> {
        self.entries.iter().find(|(candidate, _)| candidate == key).map(|(_, value)| value)
    }

    /// Looks up a dotted key path. Returns `None` if the path does not resolve.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Resolved<'_>> {
        self.lookup(path).ok()
    }

    /// Looks up a dotted key path, reporting why it failed.
    pub fn lookup(&self, path: &str) -> Result<Resolved<'_>, LookupError> {
        self.lookup_with_separator(path, DEFAULT_KEY_SEPARATOR)
    }

    /// Looks up a key path whose keys are joined by `separator`.
    pub fn lookup_with_separator(
        &self,
        path: &str,
        separator: &str,
    ) -> Result<Resolved<'_>, LookupError> {
        let key_path = KeyPath::parse(path, separator)?;

        let mut walked = String::new();
        let mut current: Option<Resolved<'_>> = None;

        for segment in key_path.segments() {
            let next = match current {
                None => self.child(segment.text()).map(Resolved::Value),
                Some(Resolved::Value(LocaleValue::Bundle(bundle))) => {
                    bundle.child(segment.text()).map(Resolved::Value)
                }
                Some(Resolved::Value(LocaleValue::List(items))) => {
                    let found = segment.index().and_then(|i| items.get(i));
                    if found.is_none() {
                        return Err(LookupError::IndexOutOfRange {
                            path: path.to_string(),
                            parent: walked,
                            segment: segment.text().to_string(),
                            len: items.len(),
                        });
                    }
                    found.map(|item| Resolved::Text(item))
                }
                Some(Resolved::Value(LocaleValue::Pairs(pairs))) => {
                    let found = segment.index().and_then(|i| pairs.get(i));
                    if found.is_none() {
                        return Err(LookupError::IndexOutOfRange {
                            path: path.to_string(),
                            parent: walked,
                            segment: segment.text().to_string(),
                            len: pairs.len(),
                        });
                    }
                    found.map(Resolved::Pair)
                }
                Some(Resolved::Pair(pair)) => {
                    let found = segment.index().and_then(|i| pair.field(i));
                    if found.is_none() {
                        return Err(LookupError::IndexOutOfRange {
                            path: path.to_string(),
                            parent: walked,
                            segment: segment.text().to_string(),
                            len: 2,
                        });
                    }
                    found.map(Resolved::Text)
                }
                Some(scalar @ (Resolved::Value(LocaleValue::Text(_)) | Resolved::Text(_))) => {
                    return Err(LookupError::NotAContainer {
                        path: path.to_string(),
                        parent: walked,
                        kind: scalar.kind(),
                    });
                }
            };

            let Some(next) = next else {
                return Err(LookupError::MissingKey {
                    path: path.to_string(),
                    segment: segment.text().to_string(),
                });
            };

            segment.append_to(&mut walked, separator);
            current = Some(next);
        }

        current.ok_or(LookupError::Path(KeyPathError::Empty))
    }

    /// String at `path`, or `None` if missing or not a string.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|resolved| resolved.as_text())
    }

    #[must_use]
    pub fn list(&self, path: &str) -> Option<&[String]> {
        self.get(path).and_then(|resolved| resolved.as_value()).and_then(LocaleValue::as_list)
    }

    #[must_use]
    pub fn pairs(&self, path: &str) -> Option<&[OptionPair]> {
        self.get(path).and_then(|resolved| resolved.as_value()).and_then(LocaleValue::as_pairs)
    }

    #[must_use]
    pub fn pair(&self, path: &str) -> Option<&OptionPair> {
        self.get(path).and_then(|resolved| resolved.as_pair())
    }

    #[must_use]
    pub fn bundle(&self, path: &str) -> Option<&Self> {
        self.get(path).and_then(|resolved| resolved.as_value()).and_then(LocaleValue::as_bundle)
    }

    /// Flattens every leaf into `(key, text)` pairs in source order.
    ///
    /// # Examples
    /// ```
    /// use otp_locale::bundle::LocaleBundle;
    ///
    /// let bundle = LocaleBundle::from_json_str(
    ///     r#"{"time": {"min": "min", "months": ["Sty", "Lut"]}}"#,
    /// ).unwrap();
    ///
    /// let flat = bundle.flatten(".");
    /// assert_eq!(flat[0], ("time.min".to_string(), "min".to_string()));
    /// assert_eq!(flat[2], ("time.months[1]".to_string(), "Lut".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> Vec<(String, String)> {
        let mut result = Vec::new();
        flatten_bundle(self, separator, None, &mut result);
        result
    }

    /// Flattened leaves at or below `prefix`.
    #[must_use]
    pub fn flatten_under(&self, prefix: &str, separator: &str) -> Vec<(String, String)> {
        self.flatten(separator)
            .into_iter()
            .filter(|(key, _)| key == prefix || is_child_key(key, prefix, separator))
            .collect()
    }
}

impl Serialize for LocaleBundle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn flatten_bundle(
    bundle: &LocaleBundle,
    separator: &str,
    prefix: Option<&str>,
    result: &mut Vec<(String, String)>,
) {
    for (key, value) in &bundle.entries {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        flatten_value(value, separator, &full_key, result);
    }
}

fn flatten_value(
    value: &LocaleValue,
    separator: &str,
    key: &str,
    result: &mut Vec<(String, String)>,
) {
    match value {
        LocaleValue::Text(text) => result.push((key.to_string(), text.clone())),
        LocaleValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                result.push((format!("{key}[{index}]"), item.clone()));
            }
        }
        LocaleValue::Pairs(pairs) => {
            for (index, pair) in pairs.iter().enumerate() {
                result.push((format!("{key}[{index}][0]"), pair.value.clone()));
                result.push((format!("{key}[{index}][1]"), pair.label.clone()));
            }
        }
        LocaleValue::Bundle(bundle) => flatten_bundle(bundle, separator, Some(key), result),
    }
}
