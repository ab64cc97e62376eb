//! Shared utilities used by the webhook executor.

pub mod status_text;
pub mod timing;

pub use status_text::status_text;
pub use timing::RequestTiming;
