use std::path::PathBuf;

use url::Url;

use crate::error::SettingsError;

use super::env_file::EnvMap;

pub const CONFIGFILES_PATH: &str = "CONFIGFILES_PATH";
pub const API_HOST: &str = "API_HOST";
pub const API_PORT: &str = "API_PORT";
pub const BASIC_AUTH_USERNAME: &str = "BASIC_AUTH_USERNAME";
pub const BASIC_AUTH_PASSWORD: &str = "BASIC_AUTH_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Process-wide request context, read once at startup.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    base: String,
    pub credentials: Credentials,
}

impl ExecutionContext {
    /// `host` must carry the scheme, e.g. `https://api.internal`.
    pub fn new(host: &str, port: u16, credentials: Credentials) -> Result<Self, SettingsError> {
        let base = format!("{}:{}", host.trim_end_matches('/'), port);
        let parsed = Url::parse(&base).map_err(|source| SettingsError::InvalidEndpoint {
            endpoint: base.clone(),
            source,
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SettingsError::UnsupportedScheme {
                    endpoint: base,
                    scheme: other.to_string(),
                })
            }
        }
        Ok(Self { base, credentials })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base, path))
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub configfiles_path: PathBuf,
    pub context: ExecutionContext,
}

impl Settings {
    /// Reads the process environment; `fallback` fills in variables that
    /// are unset or empty there.
    pub fn from_env(fallback: &EnvMap) -> Result<Self, SettingsError> {
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.is_empty())
                .or_else(|| fallback.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(SettingsError::MissingVariable(key))
        };

        // every variable is checked before any of them is interpreted
        let configfiles_path = required(CONFIGFILES_PATH)?;
        let host = required(API_HOST)?;
        let port_raw = required(API_PORT)?;
        let username = required(BASIC_AUTH_USERNAME)?;
        let password = required(BASIC_AUTH_PASSWORD)?;

        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|source| SettingsError::InvalidPort {
                value: port_raw.clone(),
                source,
            })?;

        let context = ExecutionContext::new(&host, port, Credentials { username, password })?;

        Ok(Self {
            configfiles_path: PathBuf::from(configfiles_path),
            context,
        })
    }
}
