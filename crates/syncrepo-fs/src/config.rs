//! Format-agnostic configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and handles
/// serialization/deserialization transparently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        // Reject before touching the disk
        format_name(&extension)?;
        let content = io::read_text(path)?;

        let parse_err = |format: &str, message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_err("TOML", e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| parse_err("JSON", e.to_string())),
            _ => serde_yaml::from_str(&content).map_err(|e| parse_err("YAML", e.to_string())),
        }
    }

    /// Save configuration to a file.
    ///
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        let format = format_name(&extension)?;

        let serialize_err = |message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        let mut content = match extension.as_str() {
            "toml" => toml::to_string_pretty(value).map_err(|e| serialize_err(e.to_string()))?,
            "json" => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_err(e.to_string()))?
            }
            _ => serde_yaml::to_string(value).map_err(|e| serialize_err(e.to_string()))?,
        };
        if !content.ends_with('\n') {
            content.push('\n');
        }

        io::write_atomic(path, content.as_bytes())
    }
}

fn format_name(extension: &str) -> Result<&'static str> {
    match extension {
        "toml" => Ok("TOML"),
        "json" => Ok("JSON"),
        "yaml" | "yml" => Ok("YAML"),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
