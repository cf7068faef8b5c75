//! Building bundles from JSON resources.
//!
//! The JSON is read into a tree that keeps every object member, so a key
//! repeated inside one object is reported instead of silently overwritten.

use std::fmt;

use serde::Deserialize;
use serde::de::{
    self,
    MapAccess,
    SeqAccess,
    Visitor,
};

use super::error::BundleError;
use super::value::{
    LocaleBundle,
    LocaleValue,
    OptionPair,
};

/// JSON value with object members kept as written, repeats included.
#[derive(Debug)]
enum RawJson {
    String(String),
    Array(Vec<RawJson>),
    Object(Vec<(String, RawJson)>),
    /// Numbers, booleans and `null`, rendered for error messages.
    Other(String),
}

/// Builds `RawJson` without collapsing repeated object keys.
struct RawJsonVisitor;

impl<'de> Visitor<'de> for RawJsonVisitor {
    type Value = RawJson;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawJson, E> {
        Ok(RawJson::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawJson, E> {
        Ok(RawJson::String(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<RawJson, E> {
        Ok(RawJson::Other(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawJson, E> {
        Ok(RawJson::Other(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawJson, E> {
        Ok(RawJson::Other(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawJson, E> {
        Ok(RawJson::Other(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawJson, E> {
        Ok(RawJson::Other("null".to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawJson, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawJson::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawJson, A::Error> {
        let mut members = Vec::new();
        while let Some(member) = map.next_entry()? {
            members.push(member);
        }
        Ok(RawJson::Object(members))
    }
}

impl<'de> Deserialize<'de> for RawJson {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawJsonVisitor)
    }
}

impl RawJson {
    fn describe(&self) -> String {
        match self {
            Self::String(text) => format!("{text:?}"),
            Self::Array(_) => "an array".to_string(),
            Self::Object(_) => "an object".to_string(),
            Self::Other(text) => text.clone(),
        }
    }
}

impl LocaleBundle {
    /// Parses a bundle from JSON text.
    ///
    /// Objects become nested bundles, strings become text, arrays of strings
    /// become lists and arrays of `[value, label]` string pairs become option
    /// lists. Anything else is rejected with the offending path, and so is a
    /// key repeated within one object.
    ///
    /// # Examples
    /// ```
    /// use otp_locale::bundle::LocaleBundle;
    ///
    /// let bundle = LocaleBundle::from_json_str(
    ///     r#"{"tripPlanner": {"wheelchair": [["false", "Niewymagane"], ["true", "Wymagane"]]}}"#,
    /// ).unwrap();
    ///
    /// assert_eq!(bundle.text("tripPlanner.wheelchair[1][1]"), Some("Wymagane"));
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, BundleError> {
        let json: RawJson = serde_json::from_str(text)
            .map_err(|e| BundleError::Parse { message: e.to_string() })?;

        let RawJson::Object(members) = json else {
            return Err(BundleError::Structure {
                path: "<root>".to_string(),
                message: "the bundle must be a JSON object".to_string(),
            });
        };

        bundle_from_members(members, None)
    }
}

fn bundle_from_members(
    members: Vec<(String, RawJson)>,
    prefix: Option<&str>,
) -> Result<LocaleBundle, BundleError> {
    let full_key = |key: &str| prefix.map_or_else(|| key.to_string(), |p| format!("{p}.{key}"));

    let entries = members
        .into_iter()
        .map(|(key, value)| {
            let value = value_from_json(value, &full_key(&key))?;
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, BundleError>>()?;

    LocaleBundle::from_entries(entries).map_err(|e| match e {
        BundleError::DuplicateKey { key } => BundleError::DuplicateKey { key: full_key(&key) },
        other => other,
    })
}

fn value_from_json(json: RawJson, path: &str) -> Result<LocaleValue, BundleError> {
    match json {
        RawJson::String(text) => Ok(LocaleValue::Text(text)),
        RawJson::Object(members) => Ok(LocaleValue::Bundle(bundle_from_members(members, Some(path))?)),
        RawJson::Array(items) => array_from_json(items, path),
        RawJson::Other(other) => Err(BundleError::Structure {
            path: path.to_string(),
            message: format!("expected a string, array or object, found {other}"),
        }),
    }
}

fn array_from_json(items: Vec<RawJson>, path: &str) -> Result<LocaleValue, BundleError> {
    if items.iter().all(|item| matches!(item, RawJson::String(_))) {
        let strings = items
            .into_iter()
            .filter_map(|item| match item {
                RawJson::String(text) => Some(text),
                _ => None,
            })
            .collect();
        return Ok(LocaleValue::List(strings));
    }

    let pairs = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| pair_from_json(item, &format!("{path}[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LocaleValue::Pairs(pairs))
}

fn pair_from_json(item: RawJson, path: &str) -> Result<OptionPair, BundleError> {
    if let RawJson::Array(fields) = &item
        && let [RawJson::String(value), RawJson::String(label)] = fields.as_slice()
    {
        return Ok(OptionPair::new(value.as_str(), label.as_str()));
    }

    Err(BundleError::Structure {
        path: path.to_string(),
        message: format!(
            "expected a [value, label] pair of strings, found {}",
            item.describe()
        ),
    })
}
