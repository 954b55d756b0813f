pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod plan;

pub use error::ApplyError;
pub use pipeline::{Pipeline, RunSummary};
