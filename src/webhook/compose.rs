//! Builds webhook requests from the three supported body formats.

use super::types::{FormField, RequestBody, RequestSpec};
use crate::error::ComposeError;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::form_urlencoded;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const URL_ENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body format selected by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "format", rename_all = "kebab-case")]
pub enum Payload {
    Json {
        body: String,
    },
    FormData {
        #[serde(default)]
        fields: Vec<FormField>,
    },
    UrlEncoded {
        #[serde(default)]
        fields: Vec<FormField>,
    },
}

/// A submitted webhook form: target URL, extra headers and payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl WebhookForm {
    /// Validates the form and produces the request to send.
    ///
    /// Extra headers replace any header the format sets under the same name,
    /// compared case-insensitively.
    pub fn compose(self) -> Result<RequestSpec, ComposeError> {
        let mut spec = match self.payload {
            Payload::Json { body } => compose_json(&self.url, body)?,
            Payload::FormData { fields } => compose_form_data(&self.url, fields)?,
            Payload::UrlEncoded { fields } => compose_url_encoded(&self.url, &fields)?,
        };
        for (name, value) in self.headers {
            spec.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            spec.headers.insert(name, value);
        }
        Ok(spec)
    }
}

fn require_url(url: &str) -> Result<String, ComposeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ComposeError::MissingUrl);
    }
    Ok(url.to_string())
}

/// POSTs raw JSON text. The text must parse but is sent unmodified.
pub fn compose_json(url: &str, body: String) -> Result<RequestSpec, ComposeError> {
    let url = require_url(url)?;
    serde_json::from_str::<serde_json::Value>(&body)
        .map_err(|e| ComposeError::InvalidJson(e.to_string()))?;

    Ok(RequestSpec::post(url)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(RequestBody::Text(body)))
}

/// POSTs the fields as `multipart/form-data`.
pub fn compose_form_data(url: &str, fields: Vec<FormField>) -> Result<RequestSpec, ComposeError> {
    let url = require_url(url)?;
    Ok(RequestSpec::post(url).body(RequestBody::Form(fields)))
}

/// POSTs the fields as an `application/x-www-form-urlencoded` string.
pub fn compose_url_encoded(url: &str, fields: &[FormField]) -> Result<RequestSpec, ComposeError> {
    let url = require_url(url)?;
    Ok(RequestSpec::post(url)
        .header("Content-Type", URL_ENCODED_CONTENT_TYPE)
        .body(RequestBody::Text(encode_fields(fields))))
}

/// Serializes fields as `key=value` pairs joined with `&`.
pub fn encode_fields(fields: &[FormField]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|f| (f.name.as_str(), f.value.as_str())))
        .finish()
}
