//! # Configuration Sources
//!
//! Reads configuration files and parses them as YAML (a superset of JSON)
//! into `serde_json::Value` documents.
//!
//! Files are read concurrently; the returned documents are always in the
//! order of the requested paths, regardless of which read finished first.
//! An empty document counts as an empty mapping. Any other non-mapping
//! root is rejected, since it cannot be merged into a configuration.

use std::path::Path;

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::debug;

use conform_core::Kind;

use crate::error::ConfigError;

/// Read and parse every file in `paths`, preserving their order.
///
/// # Errors
///
/// Returns the first `ConfigError::Load` encountered.
pub async fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Value>, ConfigError> {
    try_join_all(paths.iter().map(|path| read_source(path.as_ref()))).await
}

/// Read and parse one configuration file.
pub async fn read_source(path: &Path) -> Result<Value, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| load_error(path, e))?;
    let document = parse_source(path, &text)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded configuration source");
    Ok(document)
}

/// Parse the text of a configuration file. `path` is only used for errors.
pub fn parse_source(path: &Path, text: &str) -> Result<Value, ConfigError> {
    let json = parse_yaml(text).map_err(|e| load_error(path, e))?;
    match json {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(json),
        other => Err(load_error(
            path,
            format!("expected a mapping at the document root, found {}", Kind::of(&other)),
        )),
    }
}

fn load_error(path: &Path, reason: impl ToString) -> ConfigError {
    ConfigError::Load {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Parse YAML (or JSON) text straight into a document.
///
/// Mapping keys keep their order and are always read as strings, so `1: x`
/// yields the key `"1"`. Tagged values have no JSON counterpart and are
/// rejected.
pub fn parse_yaml(text: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(text)
}
