//! Trip planner message codes.
//!
//! The planner backend answers with a numeric code alongside (or instead of)
//! its own message text. Bundles map each code to a localized fallback under
//! `tripPlanner.msgcodes`.

use std::fmt;

use thiserror::Error;

use crate::bundle::LocaleBundle;

/// Path of the code-to-message section inside a bundle.
pub const MSGCODES_PATH: &str = "tripPlanner.msgcodes";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown trip planner message code: {0}")]
pub struct UnknownMessageCode(pub u16);

/// Codes the planner backend may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageCode {
    PlanOk,
    GeocodeFromAmbiguous,
    GeocodeToAmbiguous,
    GeocodeFromToAmbiguous,
    OutsideBounds,
    PathNotFound,
    NoTransitTimes,
    RequestTimeout,
    TooClose,
    BogusParameter,
    GeocodeFromNotFound,
    GeocodeToNotFound,
    GeocodeFromToNotFound,
    SystemError,
}

impl MessageCode {
    /// Every code, ascending by number.
    pub const ALL: [Self; 14] = [
        Self::PlanOk,
        Self::GeocodeFromAmbiguous,
        Self::GeocodeToAmbiguous,
        Self::GeocodeFromToAmbiguous,
        Self::OutsideBounds,
        Self::PathNotFound,
        Self::NoTransitTimes,
        Self::RequestTimeout,
        Self::TooClose,
        Self::BogusParameter,
        Self::GeocodeFromNotFound,
        Self::GeocodeToNotFound,
        Self::GeocodeFromToNotFound,
        Self::SystemError,
    ];

    /// Number sent by the backend. Stable; never renumber.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::PlanOk => 200,
            Self::GeocodeFromAmbiguous => 340,
            Self::GeocodeToAmbiguous => 350,
            Self::GeocodeFromToAmbiguous => 360,
            Self::OutsideBounds => 400,
            Self::PathNotFound => 404,
            Self::NoTransitTimes => 406,
            Self::RequestTimeout => 408,
            Self::TooClose => 409,
            Self::BogusParameter => 413,
            Self::GeocodeFromNotFound => 440,
            Self::GeocodeToNotFound => 450,
            Self::GeocodeFromToNotFound => 460,
            Self::SystemError => 500,
        }
    }

    /// English description for logs.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PlanOk => "plan ok",
            Self::GeocodeFromAmbiguous => "origin ambiguous",
            Self::GeocodeToAmbiguous => "destination ambiguous",
            Self::GeocodeFromToAmbiguous => "origin and destination ambiguous",
            Self::OutsideBounds => "trip outside the served area",
            Self::PathNotFound => "no path found",
            Self::NoTransitTimes => "no transit times available",
            Self::RequestTimeout => "request timed out",
            Self::TooClose => "origin and destination too close",
            Self::BogusParameter => "invalid request parameter",
            Self::GeocodeFromNotFound => "origin not geocoded",
            Self::GeocodeToNotFound => "destination not geocoded",
            Self::GeocodeFromToNotFound => "origin and destination not geocoded",
            Self::SystemError => "server error",
        }
    }

    /// Key of this code inside the `msgcodes` section.
    #[must_use]
    pub fn key(self) -> String {
        self.code().to_string()
    }
}

impl TryFrom<u16> for MessageCode {
    type Error = UnknownMessageCode;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code() == code)
            .ok_or(UnknownMessageCode(code))
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl LocaleBundle {
    /// Localized fallback text for `code`.
    #[must_use]
    pub fn message_for(&self, code: MessageCode) -> Option<&str> {
        self.bundle(MSGCODES_PATH)?.child(&code.key())?.as_text()
    }

    /// Localized fallback text for a raw code; `None` for unknown codes.
    #[must_use]
    pub fn message_for_code(&self, code: u16) -> Option<&str> {
        MessageCode::try_from(code).ok().and_then(|code| self.message_for(code))
    }

    /// Text to show for a planner response.
    ///
    /// Non-blank text from the server wins; otherwise the localized message
    /// for `code` is used.
    #[must_use]
    pub fn response_message<'a>(
        &'a self,
        code: u16,
        server_message: Option<&'a str>,
    ) -> Option<&'a str> {
        if let Some(message) = server_message
            && !message.trim().is_empty()
        {
            return Some(message);
        }

        let fallback = self.message_for_code(code);
        if fallback.is_none() {
            tracing::warn!(code, "No message available for planner response code");
        }
        fallback
    }
}
