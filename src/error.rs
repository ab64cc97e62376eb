use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::webhook::{Report, ResponseOutcome};

/// Failures of a single webhook attempt. Their messages are shown to the user verbatim.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Invalid URL format. Please enter a valid URL.")]
    InvalidUrl,

    #[error("Request timed out after {}.", seconds(.0))]
    Timeout(u64),

    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    #[error("{0}")]
    Network(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ExecuteError {
    fn from(err: reqwest::Error) -> Self {
        ExecuteError::Network(error_chain(&err))
    }
}

fn seconds(secs: &u64) -> String {
    if *secs == 1 {
        "1 second".to_string()
    } else {
        format!("{} seconds", secs)
    }
}

/// Problems with user input detected before a request is composed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Please enter a webhook URL")]
    MissingUrl,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Executor(#[from] ExecuteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Compose(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Executor(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let report = Report::new(ResponseOutcome::failure(self.to_string()));

        (status, Json(report)).into_response()
    }
}

/// Joins an error with its sources, e.g. `error sending request: connection refused`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
