use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::types::College;

const SAMPLE_DATA: &str = include_str!("../../data/colleges.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            _ => bail!(
                "Unsupported data file {}: expected .json, .yaml or .yml",
                path.display()
            ),
        }
    }
}

/// `colleges:` wrapper around the record list
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Wrapped {
    colleges: Vec<College>,
}

/// Whether the document is a bare list rather than a `colleges:` mapping.
///
/// Looks at the first line that is not blank, a comment or a `---` marker.
fn is_bare_list(content: &str) -> bool {
    content
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("---"))
        .is_some_and(|line| line.starts_with('[') || line.starts_with("- ") || line == "-")
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(content);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        if path.is_empty() || path == "." {
            anyhow!("invalid JSON: {}", err.inner())
        } else {
            anyhow!("invalid JSON at '{}': {}", path, err.inner())
        }
    })?;
    de.end().map_err(|e| anyhow!("invalid JSON: {}", e))?;
    Ok(value)
}

fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_saphyr::from_str(content).map_err(|e| anyhow!("invalid YAML: {}", e))
}

/// Parse college records from a string.
///
/// Accepts either a bare list or a `colleges:` wrapper. Errors name the
/// offending record and field where the format allows it.
pub fn parse_colleges(content: &str, format: DataFormat) -> Result<Vec<College>> {
    let bare = is_bare_list(content);
    let colleges = match (format, bare) {
        (DataFormat::Json, true) => parse_json::<Vec<College>>(content),
        (DataFormat::Json, false) => parse_json::<Wrapped>(content).map(|w| w.colleges),
        (DataFormat::Yaml, true) => parse_yaml::<Vec<College>>(content),
        (DataFormat::Yaml, false) => parse_yaml::<Wrapped>(content).map(|w| w.colleges),
    };
    colleges.map_err(|e| anyhow!("Failed to parse college data: {}", e))
}

/// Load college records from a JSON or YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The file extension is not .json, .yaml or .yml
/// - The file cannot be read
/// - The contents cannot be parsed
pub fn load_colleges(path: &Path) -> Result<Vec<College>> {
    let format = DataFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read college data at {}", path.display()))?;
    let colleges = parse_colleges(&content, format)
        .with_context(|| format!("Invalid college data in {}", path.display()))?;
    debug!(count = colleges.len(), path = %path.display(), "Loaded colleges");
    Ok(colleges)
}

/// The bundled demo dataset
pub fn sample_colleges() -> Result<Vec<College>> {
    parse_colleges(SAMPLE_DATA, DataFormat::Json).context("Bundled sample data is invalid")
}
