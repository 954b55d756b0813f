use std::{path::PathBuf, time::Duration};

use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConf {
    pub request_timeout: Duration,
    pub retry_attempts: u32,
}

/// One fully merged API call, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    pub path: String,
    pub payload: String,
    pub client_conf: ClientConf,
}

#[derive(Debug, Clone)]
pub struct PlannedCall {
    /// Position across the whole run, counted from 0.
    pub index: usize,
    pub source: PathBuf,
    pub url: Url,
    pub call: CallDescriptor,
}
