use super::types::ResponseOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Success,
    Error,
}

/// One-line verdict on an outcome. Only 2xx responses count as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub kind: SummaryKind,
    pub message: String,
}

impl StatusSummary {
    pub fn from_outcome(outcome: &ResponseOutcome) -> Self {
        match outcome {
            ResponseOutcome::Failure { message } => Self {
                kind: SummaryKind::Error,
                message: format!("Error: {}", message),
            },
            ResponseOutcome::Success(data) if (200..300).contains(&data.status_code) => Self {
                kind: SummaryKind::Success,
                message: format!("Success! Response received in {}ms", data.duration_ms),
            },
            ResponseOutcome::Success(data) => Self {
                kind: SummaryKind::Error,
                message: format!("Failed with status: {} {}", data.status_code, data.status_text),
            },
        }
    }
}

/// Outcome together with its rendered text and summary, as returned to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub response: ResponseOutcome,
    pub rendered: String,
    pub status: StatusSummary,
}

impl Report {
    pub fn new(response: ResponseOutcome) -> Self {
        Self {
            rendered: response.render(),
            status: StatusSummary::from_outcome(&response),
            response,
        }
    }
}
