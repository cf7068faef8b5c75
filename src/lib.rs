//! otp-locale
//!
//! Polish locale bundle for the OpenTripPlanner trip-planning client, with
//! key-path lookup, message-code fallbacks and a line-oriented lookup service.

pub mod bundle;
pub mod config;
pub mod locale;
pub mod msgcodes;
pub mod schema;
pub mod service;

mod test_utils;

pub use bundle::{
    LocaleBundle,
    LocaleValue,
    OptionPair,
};
pub use locale::{
    Language,
    polish,
};
pub use msgcodes::MessageCode;
