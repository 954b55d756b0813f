use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tokio::fs;

use crate::error::ParseError;

#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub fields: Mapping,
}

pub async fn load_document(path: &Path) -> Result<ConfigDocument, ParseError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_document(&raw, path)
}

fn parse_document(contents: &str, path: &Path) -> Result<ConfigDocument, ParseError> {
    let value: Value = serde_yaml::from_str(contents).map_err(|source| ParseError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Mapping(fields) => Ok(ConfigDocument {
            path: path.to_path_buf(),
            fields,
        }),
        _ => Err(ParseError::NotMapping {
            path: path.to_path_buf(),
        }),
    }
}
