use std::{collections::HashMap, fs, io::Cursor, path::Path};

use anyhow::{Context, Result};

pub type EnvMap = HashMap<String, String>;

/// Reads a dotenv file into a map. The process environment is left untouched;
/// callers layer the map underneath it.
pub fn load_env_file(path: &Path) -> Result<EnvMap> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading env file {}", path.display()))?;

    let mut env = EnvMap::new();
    for item in dotenvy::from_read_iter(Cursor::new(content)) {
        let (key, value) = item.with_context(|| format!("parsing env file {}", path.display()))?;
        env.insert(key, value);
    }

    Ok(env)
}
