//! Configuration loading and saving

use crate::format::AssemblyConfig;
use crate::normalize::{json_to_toml, normalize_config, Normalized};
use hilt_core::{HiltError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a configuration to TOML
pub fn config_to_string(config: &AssemblyConfig) -> Result<String> {
    let content = toml::to_string_pretty(config)?;
    Ok(content)
}

/// Parse a configuration record.
///
/// TOML is expected; a record that looks like a JSON object is read as a
/// legacy record exported from browser storage. Either way the result goes
/// through [`normalize_config`].
pub fn config_from_str(content: &str) -> Result<Normalized> {
    let trimmed = content.trim_start();
    let value = if trimmed.starts_with('{') {
        let json: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|e| HiltError::JsonError(e.to_string()))?;
        json_to_toml(&json)
            .ok_or_else(|| HiltError::ConfigError("record is null".to_string()))?
    } else {
        toml::Value::Table(toml::from_str::<toml::Table>(content)?)
    };
    Ok(normalize_config(&value))
}

/// Load a configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Normalized> {
    let content = fs::read_to_string(path)?;
    config_from_str(&content)
}

/// Load a configuration file, falling back to defaults if it is missing or
/// unreadable
pub fn load_or_default<P: AsRef<Path>>(path: P) -> AssemblyConfig {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return AssemblyConfig::default();
    }
    match load_config(path) {
        Ok(normalized) => normalized.config,
        Err(e) => {
            log::warn!("config {} unreadable ({}), using defaults", path.display(), e);
            AssemblyConfig::default()
        }
    }
}

/// Save a configuration file, creating parent directories as needed
pub fn save_config<P: AsRef<Path>>(path: P, config: &AssemblyConfig) -> Result<()> {
    let path = path.as_ref();
    let content = config_to_string(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

/// `<config_dir>/hiltsmith/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hiltsmith").join("config.toml"))
}
