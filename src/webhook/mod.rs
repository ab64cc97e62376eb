pub mod compose;
pub mod executor;
pub mod response_builder;
pub mod service;
pub mod summary;
pub mod types;

pub use compose::{compose_form_data, compose_json, compose_url_encoded, Payload, WebhookForm};
pub use executor::{RequestExecutor, DEFAULT_TIMEOUT_SECS};
pub use response_builder::{decode_body, UNPARSEABLE_BODY};
pub use service::{SharedWebhookService, WebhookService};
pub use summary::{Report, StatusSummary, SummaryKind};
pub use types::*;
