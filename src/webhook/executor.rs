//! Webhook request execution.
//!
//! Validates the target URL, fires a single request under a timeout and
//! normalizes whatever comes back into a `ResponseOutcome`. HTTP error
//! statuses are successful outcomes; only invalid URLs, timeouts and
//! transport errors become failures.

use super::response_builder::{build_response, collect_headers, decode_body, ResponseBuildParams};
use super::types::*;
use crate::error::ExecuteError;
use crate::shared::RequestTiming;
use reqwest::{multipart, Client, Request};
use std::time::Duration;
use tokio::time::timeout;

/// Default time allowed for the response headers to arrive, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fires webhook requests. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new() -> Result<Self, ExecuteError> {
        Self::with_timeout_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Builds an executor whose watchdog fires after `secs` whole seconds.
    pub fn with_timeout_secs(secs: u64) -> Result<Self, ExecuteError> {
        if secs == 0 {
            return Err(ExecuteError::InvalidTimeout);
        }
        let client = Client::builder()
            .build()
            .map_err(|e| ExecuteError::Client(e.to_string()))?;
        Ok(Self {
            client,
            timeout: Duration::from_secs(secs),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Executes one request and normalizes the result. Never returns an error;
    /// failures are reported inside the outcome.
    pub async fn execute(&self, spec: RequestSpec) -> ResponseOutcome {
        match self.try_execute(spec).await {
            Ok(data) => {
                tracing::debug!(
                    status = data.status_code,
                    duration_ms = data.duration_ms,
                    "Webhook responded"
                );
                ResponseOutcome::Success(data)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Webhook request failed");
                ResponseOutcome::failure(e.to_string())
            }
        }
    }

    async fn try_execute(&self, spec: RequestSpec) -> Result<ResponseData, ExecuteError> {
        let request = self.build_request(spec)?;

        tracing::debug!(method = %request.method(), url = %request.url(), "Dispatching webhook");

        let mut timing = RequestTiming::start();
        let response = match timeout(self.timeout, self.client.execute(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(ExecuteError::Timeout(self.timeout.as_secs())),
        };
        timing.mark_headers();

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let content_type = headers.get("content-type").cloned();

        // The body read gets its own window so a stalled stream still yields an outcome.
        let bytes = match timeout(self.timeout, response.bytes()).await {
            Ok(read) => read.map_err(|e| e.to_string()),
            Err(_) => Err(format!("body read exceeded {}s", self.timeout.as_secs())),
        };
        let body = decode_body(content_type.as_deref(), bytes);

        Ok(build_response(ResponseBuildParams {
            status,
            headers,
            body,
            duration_ms: timing.duration_ms(),
        }))
    }

    fn build_request(&self, spec: RequestSpec) -> Result<Request, ExecuteError> {
        let url = url::Url::parse(&spec.url).map_err(|_| ExecuteError::InvalidUrl)?;

        // Multipart bodies carry their own boundary Content-Type.
        let is_form = matches!(spec.body, RequestBody::Form(_));

        let mut builder = self.client.request(spec.method, url);
        for (name, value) in &spec.headers {
            if is_form && name.eq_ignore_ascii_case("content-type") {
                tracing::debug!(value = %value, "Ignoring Content-Type override on multipart body");
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match spec.body {
            RequestBody::Empty => builder,
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Form(fields) => {
                let form = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |form, field| form.text(field.name, field.value));
                builder.multipart(form)
            }
        };

        Ok(builder.build()?)
    }
}
