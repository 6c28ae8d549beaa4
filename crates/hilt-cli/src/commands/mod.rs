//! CLI command implementations

pub mod assemble;
pub mod config;
pub mod inspect;
pub mod layout;
pub mod material;
pub mod variants;

use anyhow::{bail, Context, Result};
use hilt_catalog::DimensionTable;
use hilt_config::{default_config_path, load_config, AssemblyConfig};
use std::path::{Path, PathBuf};

/// Where the dimension table comes from
pub struct TableArgs {
    pub catalog: Option<PathBuf>,
    pub parts_dir: Option<PathBuf>,
}

impl TableArgs {
    /// Built-in table with the catalog file and sidecars merged over it
    pub fn load(&self) -> Result<DimensionTable> {
        let mut table = DimensionTable::builtin();
        if let Some(path) = &self.catalog {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            table
                .merge_toml_str(&content)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        }
        if let Some(dir) = &self.parts_dir {
            let count = table
                .merge_directory(dir)
                .with_context(|| format!("Failed to scan {}", dir.display()))?;
            log::info!("merged {} part sidecar(s) from {}", count, dir.display());
        }
        Ok(table)
    }
}

/// Explicit path, or the per-user default
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit.or_else(default_config_path) {
        Some(path) => Ok(path),
        None => bail!("No config directory on this platform; pass --config"),
    }
}

/// Load the configuration, or defaults when there is no file yet
pub fn read_config(path: &Path) -> Result<AssemblyConfig> {
    if !path.exists() {
        return Ok(AssemblyConfig::default());
    }
    let normalized =
        load_config(path).with_context(|| format!("Failed to load config {}", path.display()))?;
    for field in &normalized.fallbacks {
        eprintln!("Warning: {} was invalid and has been reset", field);
    }
    Ok(normalized.config)
}

pub fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        _ => bail!("Unknown format: {}", format),
    }
}
