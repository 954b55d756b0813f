use std::{iter::Enumerate, path::Path, slice, time::Duration};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::SchemaError;

use super::{
    document::ConfigDocument,
    model::{CallDescriptor, ClientConf},
};

pub const API_CALLS: &str = "api_calls";

#[derive(Debug, Deserialize)]
struct RawCall {
    path: String,
    #[serde(default)]
    payload: Value,
    client_conf: RawClientConf,
}

#[derive(Debug, Deserialize)]
struct RawClientConf {
    request_timeout: f64,
    retry_attempts: u32,
}

/// Lazily merges each `api_calls` fragment over the document's shared fields.
///
/// Items come out in `api_calls` order; a broken fragment only surfaces when
/// the iterator reaches it.
#[derive(Debug)]
pub struct CallExpansion<'a> {
    path: &'a Path,
    shared: Mapping,
    fragments: Enumerate<slice::Iter<'a, Value>>,
}

pub fn expand(document: &ConfigDocument) -> Result<CallExpansion<'_>, SchemaError> {
    let fragments = match document.fields.get(API_CALLS) {
        Some(Value::Sequence(calls)) => calls,
        Some(_) => {
            return Err(SchemaError::CallsNotSequence {
                path: document.path.clone(),
            })
        }
        None => {
            return Err(SchemaError::MissingCalls {
                path: document.path.clone(),
            })
        }
    };

    let mut shared = document.fields.clone();
    shared.remove(API_CALLS);

    Ok(CallExpansion {
        path: &document.path,
        shared,
        fragments: fragments.iter().enumerate(),
    })
}

impl CallExpansion<'_> {
    fn merge(&self, index: usize, fragment: &Value) -> Result<CallDescriptor, SchemaError> {
        let Value::Mapping(overrides) = fragment else {
            return Err(SchemaError::FragmentNotMapping {
                path: self.path.to_path_buf(),
                index,
            });
        };

        let mut merged = self.shared.clone();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }

        let invalid = |message: String| SchemaError::InvalidCall {
            path: self.path.to_path_buf(),
            index,
            message,
        };

        let raw: RawCall =
            serde_yaml::from_value(Value::Mapping(merged)).map_err(|e| invalid(e.to_string()))?;
        descriptor_from_raw(raw).map_err(invalid)
    }
}

impl Iterator for CallExpansion<'_> {
    type Item = Result<CallDescriptor, SchemaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, fragment) = self.fragments.next()?;
        Some(self.merge(index, fragment))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fragments.size_hint()
    }
}

fn descriptor_from_raw(raw: RawCall) -> Result<CallDescriptor, String> {
    let timeout = raw.client_conf.request_timeout;
    let request_timeout = Duration::try_from_secs_f64(timeout)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| {
            format!("client_conf.request_timeout must be a positive number of seconds, got {timeout}")
        })?;

    Ok(CallDescriptor {
        path: raw.path,
        payload: render_payload(raw.payload)?,
        client_conf: ClientConf {
            request_timeout,
            retry_attempts: raw.client_conf.retry_attempts,
        },
    })
}

fn render_payload(payload: Value) -> Result<String, String> {
    match payload {
        Value::Null => Ok(String::new()),
        Value::String(body) => Ok(body),
        other => serde_json::to_string(&other)
            .map_err(|e| format!("payload cannot be rendered as JSON: {e}")),
    }
}
