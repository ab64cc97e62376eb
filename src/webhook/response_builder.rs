//! Response normalization for webhook outcomes.
//!
//! Turns the raw status, headers and body bytes of an HTTP response into a
//! `ResponseData`, decoding the body on a best-effort basis.

use super::types::ResponseData;
use crate::shared::status_text;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Substituted for any body that could not be read or parsed.
pub const UNPARSEABLE_BODY: &str = "Could not parse response body";

/// Returns `true` when the declared content type announces JSON.
pub fn is_json_content(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("application/json"))
}

/// Decodes a response body. Never fails.
///
/// Declared JSON is parsed strictly and replaced by [`UNPARSEABLE_BODY`] if it
/// is malformed. Anything else is read as text and kept as a JSON value if it
/// happens to parse as one.
pub fn decode_body<B, E>(content_type: Option<&str>, body: Result<B, E>) -> Value
where
    B: AsRef<[u8]>,
    E: Display,
{
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read response body");
            return Value::String(UNPARSEABLE_BODY.to_string());
        }
    };

    if is_json_content(content_type) {
        return serde_json::from_slice(bytes.as_ref()).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Declared JSON body did not parse");
            Value::String(UNPARSEABLE_BODY.to_string())
        });
    }

    let text = String::from_utf8_lossy(bytes.as_ref());
    serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned()))
}

/// Flattens response headers into a map, joining repeated names with ", ".
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

/// Parameters for building a successful outcome.
pub struct ResponseBuildParams {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub duration_ms: u64,
}

pub fn build_response(params: ResponseBuildParams) -> ResponseData {
    let ResponseBuildParams {
        status,
        headers,
        body,
        duration_ms,
    } = params;

    ResponseData {
        status_code: status,
        status_text: status_text(status),
        headers,
        body,
        duration_ms,
    }
}
