pub mod config;
pub mod error;
pub mod routes;
pub mod shared;
pub mod webhook;

pub use config::Config;
pub use error::{AppError, ComposeError, ExecuteError};
pub use webhook::{RequestExecutor, RequestSpec, ResponseOutcome};
