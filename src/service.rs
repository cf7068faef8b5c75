//! Line-oriented lookup service.
//!
//! Each input line is one request; each answer is one JSON line:
//!
//! - `<path>`: value at a key path
//! - `keys [<path>]`: child keys of a section (root if omitted)
//! - `flat [<prefix>]`: flattened leaves, optionally below a prefix
//! - `code <n>`: localized message for a planner response code
//!
//! Failed requests are answered with an `error` field; the service keeps
//! reading.

use serde::Serialize;
use serde_json::{
    Map,
    Value,
};
use tokio::io::{
    AsyncBufRead,
    AsyncBufReadExt,
    AsyncWrite,
    AsyncWriteExt,
};

use crate::bundle::LocaleBundle;
use crate::msgcodes::MessageCode;

/// A parsed request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Value(&'a str),
    Keys(&'a str),
    Flat(&'a str),
    Code(&'a str),
}

impl<'a> Request<'a> {
    /// Parses a trimmed, non-empty line.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        match command {
            "keys" => Self::Keys(argument),
            "flat" => Self::Flat(argument),
            "code" if !argument.is_empty() => Self::Code(argument),
            _ => Self::Value(line),
        }
    }

    /// Path, prefix or code the request is about.
    #[must_use]
    pub const fn subject(&self) -> &'a str {
        match *self {
            Self::Value(subject)
            | Self::Keys(subject)
            | Self::Flat(subject)
            | Self::Code(subject) => subject,
        }
    }
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok(path: &str, value: Value) -> Self {
        Self { path: path.to_string(), value: Some(value), error: None }
    }

    fn error(path: &str, error: impl ToString) -> Self {
        Self { path: path.to_string(), value: None, error: Some(error.to_string()) }
    }
}

/// Answers a single request against `bundle`.
#[must_use]
pub fn respond(bundle: &LocaleBundle, request: Request<'_>, separator: &str) -> Response {
    let subject = request.subject();
    tracing::debug!(?request, "Lookup request");

    let response = match request {
        Request::Value(path) => match bundle.lookup_with_separator(path, separator) {
            Ok(resolved) => match serde_json::to_value(resolved) {
                Ok(value) => Response::ok(path, value),
                Err(e) => Response::error(path, e),
            },
            Err(e) => Response::error(path, e),
        },
        Request::Keys(path) => keys_response(bundle, path, separator),
        Request::Flat(prefix) => {
            let leaves = if prefix.is_empty() {
                bundle.flatten(separator)
            } else {
                bundle.flatten_under(prefix, separator)
            };
            let map: Map<String, Value> =
                leaves.into_iter().map(|(key, text)| (key, Value::String(text))).collect();
            Response::ok(prefix, Value::Object(map))
        }
        Request::Code(raw) => code_response(bundle, raw),
    };

    if let Some(error) = &response.error {
        tracing::warn!(subject, error = %error, "Lookup failed");
    }
    response
}

fn keys_response(bundle: &LocaleBundle, path: &str, separator: &str) -> Response {
    let section = if path.is_empty() {
        Ok(bundle)
    } else {
        bundle.lookup_with_separator(path, separator).map_err(|e| e.to_string()).and_then(
            |resolved| {
                resolved
                    .as_value()
                    .and_then(|value| value.as_bundle())
                    .ok_or_else(|| format!("'{path}' is {}, not a bundle", resolved.kind()))
            },
        )
    };

    match section {
        Ok(section) => {
            let keys = section.keys().map(|key| Value::String(key.to_string())).collect();
            Response::ok(path, Value::Array(keys))
        }
        Err(e) => Response::error(path, e),
    }
}

fn code_response(bundle: &LocaleBundle, raw: &str) -> Response {
    let code = match raw.parse::<u16>() {
        Ok(code) => code,
        Err(e) => return Response::error(raw, format!("Invalid message code '{raw}': {e}")),
    };

    match MessageCode::try_from(code) {
        Ok(code) => bundle.message_for(code).map_or_else(
            || Response::error(raw, format!("No message for {code}")),
            |message| Response::ok(raw, Value::String(message.to_string())),
        ),
        Err(e) => Response::error(raw, e),
    }
}

/// Serves requests from `reader` until end of input.
///
/// # Errors
/// Returns an error if reading a line or writing a response fails.
pub async fn serve<R, W>(
    reader: R,
    mut writer: W,
    bundle: &LocaleBundle,
    separator: &str,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0_usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = respond(bundle, Request::parse(line), separator);
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        served += 1;
    }

    tracing::debug!(served, "Input closed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::bundle_from;

    #[fixture]
    fn bundle() -> LocaleBundle {
        bundle_from(&json!({
            "buttons": { "ok": "OK", "cancel": "Anuluj" },
            "time": { "months": ["Sty", "Lut"] },
            "tripPlanner": {
                "msgcodes": { "440": "Geokod Z nieodnaleziony" },
                "wheelchair": [["false", "Niewymagane"], ["true", "Wymagane"]]
            }
        }))
    }

    async fn run(bundle: &LocaleBundle, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output, bundle, ".").await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[rstest]
    #[case("buttons.ok", Request::Value("buttons.ok"))]
    #[case("keys", Request::Keys(""))]
    #[case("keys tripPlanner", Request::Keys("tripPlanner"))]
    #[case("flat  time", Request::Flat("time"))]
    #[case("code 440", Request::Code("440"))]
    #[case("code", Request::Value("code"))]
    fn parse_requests(#[case] line: &str, #[case] expected: Request<'_>) {
        assert_that!(Request::parse(line), eq(expected));
    }

    #[rstest]
    fn respond_with_value(bundle: LocaleBundle) {
        let response = respond(&bundle, Request::Value("tripPlanner.wheelchair[1]"), ".");

        assert_that!(response.value, some(eq(&json!(["true", "Wymagane"]))));
        assert_that!(response.error, none());
    }

    #[rstest]
    fn respond_with_keys(bundle: LocaleBundle) {
        let root = respond(&bundle, Request::Keys(""), ".");
        let nested = respond(&bundle, Request::Keys("tripPlanner"), ".");
        let scalar = respond(&bundle, Request::Keys("buttons.ok"), ".");

        assert_that!(root.value, some(eq(&json!(["buttons", "time", "tripPlanner"]))));
        assert_that!(nested.value, some(eq(&json!(["msgcodes", "wheelchair"]))));
        assert_that!(scalar.error, some(contains_substring("is text, not a bundle")));
    }

    #[rstest]
    fn respond_with_flat_prefix(bundle: LocaleBundle) {
        let response = respond(&bundle, Request::Flat("time"), ".");

        assert_that!(
            response.value,
            some(eq(&json!({ "time.months[0]": "Sty", "time.months[1]": "Lut" })))
        );
    }

    #[rstest]
    #[case("440", Some("Geokod Z nieodnaleziony"), None)]
    #[case("500", None, Some("No message for 500"))]
    #[case("999", None, Some("Unknown trip planner message code: 999"))]
    #[case("abc", None, Some("Invalid message code 'abc'"))]
    fn respond_with_code(
        bundle: LocaleBundle,
        #[case] raw: &str,
        #[case] message: Option<&str>,
        #[case] error: Option<&str>,
    ) {
        let response = respond(&bundle, Request::Code(raw), ".");

        match (message, error) {
            (Some(message), _) => {
                assert_that!(response.value, some(eq(&json!(message))));
            }
            (None, Some(error)) => {
                assert_that!(response.error, some(contains_substring(error)));
            }
            (None, None) => unreachable!("each case expects a message or an error"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn serve_answers_each_line(bundle: LocaleBundle) {
        let responses = run(&bundle, "buttons.cancel\n\n  time.months[1]  \nbuttons.nope\n").await;

        assert_that!(responses.len(), eq(3));
        assert_that!(responses[0], eq(&json!({ "path": "buttons.cancel", "value": "Anuluj" })));
        assert_that!(responses[1], eq(&json!({ "path": "time.months[1]", "value": "Lut" })));
        assert_that!(responses[2]["path"], eq(&json!("buttons.nope")));
        assert_that!(responses[2]["error"].as_str(), some(contains_substring("'nope' not found")));
    }

    #[rstest]
    fn serve_with_custom_separator(bundle: LocaleBundle) {
        let mut output = Vec::new();
        tokio_test::block_on(serve(&b"buttons/ok\n"[..], &mut output, &bundle, "/")).unwrap();

        let line = String::from_utf8(output).unwrap();
        assert_that!(line, eq("{\"path\":\"buttons/ok\",\"value\":\"OK\"}\n"));
    }
}
