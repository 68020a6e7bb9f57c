use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Kind of value a config key holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Number,
}

/// Keys accepted by `set_value`, as `table.field`
const KEYS: &[(&str, ValueKind)] = &[
    ("storage.data_file", ValueKind::Text),
    ("drag.min_horizontal", ValueKind::Number),
    ("drag.min_vertical", ValueKind::Number),
    ("defaults.group_name", ValueKind::Text),
    ("defaults.task_text", ValueKind::Text),
];

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let config: AppConfig = toml::from_str(&text)?;
    check_distance("drag.min_horizontal", config.drag.min_horizontal)?;
    check_distance("drag.min_vertical", config.drag.min_vertical)?;
    Ok(config)
}

/// Drag distances must be finite and non-negative.
fn check_distance(key: &str, number: f64) -> Result<f64, ConfigError> {
    if !number.is_finite() || number < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: number.to_string(),
        });
    }
    Ok(number)
}

/// Read the raw config document for format-preserving edits. A missing
/// file yields an empty document.
pub fn read_document(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_document(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_error)?;
    }
    fs::write(path, doc.to_string()).map_err(write_error)
}

/// Set `key` (e.g. `drag.min_vertical`) to `value` in the document.
/// The edited document must still parse as a valid config.
pub fn set_value(doc: &mut toml_edit::DocumentMut, key: &str, value: &str) -> Result<(), ConfigError> {
    let kind = KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    let (table, field) = key
        .split_once('.')
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    let item = match kind {
        ValueKind::Text => toml_edit::value(value),
        ValueKind::Number => {
            let number: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })?;
            toml_edit::value(check_distance(key, number)?)
        }
    };

    if !doc.contains_key(table) {
        doc[table] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[table][field] = item;

    toml::from_str::<AppConfig>(&doc.to_string())?;
    Ok(())
}
