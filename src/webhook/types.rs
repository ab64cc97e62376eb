use reqwest::Method;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single name/value pair from a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Body attached to an outbound request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Sent as-is; the caller sets the matching Content-Type header.
    Text(String),
    /// Sent as `multipart/form-data` with a client-generated boundary.
    Form(Vec<FormField>),
}

/// Everything needed to fire one webhook request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Details of a completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(rename = "status")]
    pub status_code: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    #[serde(rename = "duration", serialize_with = "serialize_duration")]
    pub duration_ms: u64,
}

fn serialize_duration<S: Serializer>(duration_ms: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{}ms", duration_ms))
}

/// Normalized result of one webhook attempt.
///
/// Serializes to the shape shown to the user: either the response details or
/// a single `error` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseOutcome {
    Success(ResponseData),
    Failure {
        #[serde(rename = "error")]
        message: String,
    },
}

impl ResponseOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{:?}: {}", self, e))
    }
}
