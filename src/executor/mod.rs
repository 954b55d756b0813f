mod models;
mod printer;
mod retry;
mod runner;

pub use models::{CallResult, TlsMode};
pub use printer::{log_attempt, log_planned, log_response};
pub use retry::{RetryPolicy, DEFAULT_BACKOFF};
pub use runner::{HttpExecutor, RequestExecutor};
