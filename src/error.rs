use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("env var '{0}' is empty or not provided")]
    MissingVariable(&'static str),
    #[error("env var 'API_PORT' is not a valid port: {value}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("API endpoint {endpoint} is not a valid URL")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API endpoint {endpoint} must use http or https, got {scheme}")]
    UnsupportedScheme { endpoint: String, scheme: String },
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("reading config directory {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config path {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("listing config directory {}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reading config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config file {} must contain a mapping at the top level", path.display())]
    NotMapping { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{}: `api_calls` is missing", path.display())]
    MissingCalls { path: PathBuf },
    #[error("{}: `api_calls` must be a sequence", path.display())]
    CallsNotSequence { path: PathBuf },
    #[error("{}: api_calls[{index}] must be a mapping", path.display())]
    FragmentNotMapping { path: PathBuf, index: usize },
    #[error("{}: api_calls[{index}]: {message}", path.display())]
    InvalidCall {
        path: PathBuf,
        index: usize,
        message: String,
    },
}

/// A single attempt failed below the HTTP layer: no response was obtained.
#[derive(Debug, Error)]
#[error("PUT {url} failed: {source}")]
pub struct TransportError {
    pub url: String,
    source: BoxError,
}

impl TransportError {
    pub fn new(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("exhausted retry attempts for {path} after {attempts} attempt(s)")]
pub struct RetryExhaustedError {
    pub path: String,
    pub attempts: u32,
    #[source]
    pub last: TransportError,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{}: api_calls[{index}] resolves to an invalid URL {url}", source_file.display())]
    InvalidUrl {
        source_file: PathBuf,
        index: usize,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    RetryExhausted(#[from] RetryExhaustedError),
}
