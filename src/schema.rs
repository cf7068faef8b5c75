//! Expected shape of an OTP locale bundle.
//!
//! The web client indexes bundles by exact key path and by position inside
//! option lists, so every bundle must carry exactly these keys with exactly
//! these kinds of values.

use thiserror::Error;

use crate::bundle::{
    LocaleBundle,
    LocaleValue,
    ValueKind,
};
use crate::msgcodes::MessageCode;

/// Expected value at one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Text,
    /// List with an exact number of items.
    List(usize),
    Pairs,
    Section(&'static [(&'static str, Expect)]),
    /// Section keyed by every [`MessageCode`].
    MessageCodes,
}

impl Expect {
    const fn kind(self) -> ValueKind {
        match self {
            Self::Text => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Pairs => ValueKind::Pairs,
            Self::Section(_) | Self::MessageCodes => ValueKind::Bundle,
        }
    }
}

/// A mismatch between a bundle and [`BUNDLE_SHAPE`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("missing key '{path}'")]
    MissingKey { path: String },

    #[error("unexpected key '{path}'")]
    UnexpectedKey { path: String },

    #[error("'{path}' should be {expected}, found {found}")]
    WrongKind { path: String, expected: ValueKind, found: ValueKind },

    #[error("'{path}' should have {expected} items, found {found}")]
    WrongLength { path: String, expected: usize, found: usize },
}

const ATTRIBUTION: &[(&str, Expect)] = &[("title", Expect::Text), ("content", Expect::Text)];

const CONFIG: &[(&str, Expect)] = &[
    ("metricsSystem", Expect::Text),
    ("rightClickMsg", Expect::Text),
    ("attribution", Expect::Section(ATTRIBUTION)),
];

const CONTEXT_MENU: &[(&str, Expect)] = &[
    ("fromHere", Expect::Text),
    ("toHere", Expect::Text),
    ("centerHere", Expect::Text),
    ("zoomInHere", Expect::Text),
    ("zoomOutHere", Expect::Text),
    ("previous", Expect::Text),
    ("next", Expect::Text),
];

const SERVICE: &[(&str, Expect)] = &[
    ("weekdays", Expect::Text),
    ("saturday", Expect::Text),
    ("sunday", Expect::Text),
    ("schedule", Expect::Text),
];

const INDICATORS: &[(&str, Expect)] = &[
    ("ok", Expect::Text),
    ("date", Expect::Text),
    ("loading", Expect::Text),
    ("searching", Expect::Text),
    ("qEmptyText", Expect::Text),
];

const BUTTONS: &[(&str, Expect)] = &[
    ("reverse", Expect::Text),
    ("reverseTip", Expect::Text),
    ("reverseMiniTip", Expect::Text),
    ("edit", Expect::Text),
    ("editTip", Expect::Text),
    ("clear", Expect::Text),
    ("clearTip", Expect::Text),
    ("fullScreen", Expect::Text),
    ("fullScreenTip", Expect::Text),
    ("print", Expect::Text),
    ("printTip", Expect::Text),
    ("link", Expect::Text),
    ("linkTip", Expect::Text),
    ("feedback", Expect::Text),
    ("feedbackTip", Expect::Text),
    ("submit", Expect::Text),
    ("clearButton", Expect::Text),
    ("ok", Expect::Text),
    ("cancel", Expect::Text),
    ("yes", Expect::Text),
    ("no", Expect::Text),
];

// Lower case; callers capitalize when needed.
const DIRECTIONS: &[(&str, Expect)] = &[
    ("southEast", Expect::Text),
    ("southWest", Expect::Text),
    ("northEast", Expect::Text),
    ("northWest", Expect::Text),
    ("north", Expect::Text),
    ("west", Expect::Text),
    ("south", Expect::Text),
    ("east", Expect::Text),
    ("bound", Expect::Text),
    ("left", Expect::Text),
    ("right", Expect::Text),
    ("slightly_left", Expect::Text),
    ("slightly_right", Expect::Text),
    ("hard_left", Expect::Text),
    ("hard_right", Expect::Text),
    ("continue", Expect::Text),
    ("to_continue", Expect::Text),
    ("becomes", Expect::Text),
    ("at", Expect::Text),
];

const TIME: &[(&str, Expect)] = &[
    ("minute_abbrev", Expect::Text),
    ("minutes_abbrev", Expect::Text),
    ("second_abbrev", Expect::Text),
    ("seconds_abbrev", Expect::Text),
    ("months", Expect::List(12)),
];

const SYSTEMMAP_LABELS: &[(&str, Expect)] = &[("panelTitle", Expect::Text)];

const SYSTEMMAP: &[(&str, Expect)] = &[("labels", Expect::Section(SYSTEMMAP_LABELS))];

const TRIP_PLANNER_LABELS: &[(&str, Expect)] = &[
    ("panelTitle", Expect::Text),
    ("tabTitle", Expect::Text),
    ("inputTitle", Expect::Text),
    ("optTitle", Expect::Text),
    ("submitMsg", Expect::Text),
    ("optionalTitle", Expect::Text),
    ("date", Expect::Text),
    ("time", Expect::Text),
    ("when", Expect::Text),
    ("from", Expect::Text),
    ("fromHere", Expect::Text),
    ("to", Expect::Text),
    ("toHere", Expect::Text),
    ("minimize", Expect::Text),
    ("maxWalkDistance", Expect::Text),
    ("arriveDepart", Expect::Text),
    ("mode", Expect::Text),
    ("wheelchair", Expect::Text),
    ("go", Expect::Text),
    ("planTrip", Expect::Text),
    ("newTrip", Expect::Text),
];

const TRIP_PLANNER_LINK: &[(&str, Expect)] = &[
    ("text", Expect::Text),
    ("trip_separator", Expect::Text),
    ("bike_separator", Expect::Text),
    ("walk_separator", Expect::Text),
    ("google_transit", Expect::Text),
    ("google_bikes", Expect::Text),
    ("google_walk", Expect::Text),
    ("google_domain", Expect::Text),
];

const TRIP_PLANNER_ERROR: &[(&str, Expect)] = &[
    ("title", Expect::Text),
    ("deadMsg", Expect::Text),
    ("geoFromMsg", Expect::Text),
    ("geoToMsg", Expect::Text),
];

const TRIP_PLANNER: &[(&str, Expect)] = &[
    ("labels", Expect::Section(TRIP_PLANNER_LABELS)),
    ("link", Expect::Section(TRIP_PLANNER_LINK)),
    ("error", Expect::Section(TRIP_PLANNER_ERROR)),
    ("msgcodes", Expect::MessageCodes),
    ("options", Expect::Pairs),
    ("arriveDepart", Expect::Pairs),
    ("maxWalkDistance", Expect::Pairs),
    ("mode", Expect::Pairs),
    ("wheelchair", Expect::Pairs),
];

/// Top-level layout shared by every OTP locale bundle.
pub const BUNDLE_SHAPE: &[(&str, Expect)] = &[
    ("config", Expect::Section(CONFIG)),
    ("contextMenu", Expect::Section(CONTEXT_MENU)),
    ("service", Expect::Section(SERVICE)),
    ("indicators", Expect::Section(INDICATORS)),
    ("buttons", Expect::Section(BUTTONS)),
    ("directions", Expect::Section(DIRECTIONS)),
    ("time", Expect::Section(TIME)),
    ("systemmap", Expect::Section(SYSTEMMAP)),
    ("tripPlanner", Expect::Section(TRIP_PLANNER)),
    ("CLASS_NAME", Expect::Text),
];

/// Checks `bundle` against [`BUNDLE_SHAPE`], collecting every mismatch.
pub fn validate_shape(bundle: &LocaleBundle) -> Result<(), Vec<ShapeError>> {
    let mut errors = Vec::new();
    check_section(bundle, BUNDLE_SHAPE, None, &mut errors);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Expected keys directly under `path`, in declaration order.
///
/// `None` if `path` is not a section of [`BUNDLE_SHAPE`].
#[must_use]
pub fn section_keys(path: &str) -> Option<Vec<String>> {
    let mut fields = BUNDLE_SHAPE;
    if !path.is_empty() {
        for key in path.split('.') {
            match fields.iter().find(|(name, _)| *name == key).map(|(_, expect)| *expect) {
                Some(Expect::Section(inner)) => fields = inner,
                Some(Expect::MessageCodes) => {
                    return Some(MessageCode::ALL.iter().map(|code| code.key()).collect());
                }
                _ => return None,
            }
        }
    }
    Some(fields.iter().map(|(name, _)| (*name).to_string()).collect())
}

fn join(prefix: Option<&str>, key: &str) -> String {
    prefix.map_or_else(|| key.to_string(), |p| format!("{p}.{key}"))
}

fn check_section(
    bundle: &LocaleBundle,
    fields: &[(&str, Expect)],
    prefix: Option<&str>,
    errors: &mut Vec<ShapeError>,
) {
    for (key, expect) in fields {
        let path = join(prefix, key);
        match bundle.child(key) {
            Some(value) => check_value(value, *expect, &path, errors),
            None => errors.push(ShapeError::MissingKey { path }),
        }
    }

    for key in bundle.keys() {
        if !fields.iter().any(|(name, _)| *name == key) {
            errors.push(ShapeError::UnexpectedKey { path: join(prefix, key) });
        }
    }
}

fn check_value(value: &LocaleValue, expect: Expect, path: &str, errors: &mut Vec<ShapeError>) {
    match (expect, value) {
        (Expect::Text, LocaleValue::Text(_)) | (Expect::Pairs, LocaleValue::Pairs(_)) => {}
        (Expect::List(expected), LocaleValue::List(items)) => {
            if items.len() != expected {
                errors.push(ShapeError::WrongLength {
                    path: path.to_string(),
                    expected,
                    found: items.len(),
                });
            }
        }
        (Expect::Section(fields), LocaleValue::Bundle(bundle)) => {
            check_section(bundle, fields, Some(path), errors);
        }
        (Expect::MessageCodes, LocaleValue::Bundle(bundle)) => {
            check_message_codes(bundle, path, errors);
        }
        _ => errors.push(ShapeError::WrongKind {
            path: path.to_string(),
            expected: expect.kind(),
            found: value.kind(),
        }),
    }
}

fn check_message_codes(bundle: &LocaleBundle, path: &str, errors: &mut Vec<ShapeError>) {
    for code in MessageCode::ALL {
        let key = code.key();
        let entry_path = join(Some(path), &key);
        match bundle.child(&key) {
            Some(LocaleValue::Text(_)) => {}
            Some(other) => errors.push(ShapeError::WrongKind {
                path: entry_path,
                expected: ValueKind::Text,
                found: other.kind(),
            }),
            None => errors.push(ShapeError::MissingKey { path: entry_path }),
        }
    }

    for key in bundle.keys() {
        let known = key.parse::<u16>().ok().and_then(|n| MessageCode::try_from(n).ok());
        if known.is_none() {
            errors.push(ShapeError::UnexpectedKey { path: join(Some(path), key) });
        }
    }
}
