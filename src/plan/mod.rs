mod discovery;
mod document;
mod expander;
mod model;

pub use discovery::discover;
pub use document::{load_document, ConfigDocument};
pub use expander::{expand, CallExpansion, API_CALLS};
pub use model::{CallDescriptor, ClientConf, PlannedCall};
