use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::CodecOptions;

/// How the CLI prints a parsed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single JSON object.
    #[default]
    Json,
    /// One `key=value` line per entry, decoded except for `%`, `=`, CR and LF.
    Lines,
}

/// Global configuration loaded from `~/.config/qstring/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QstringConfig {
    /// Locator used by `parse` when no input is given and `QSTRING_LOCATION` is unset.
    #[serde(default)]
    pub default_location: Option<String>,
    /// Output format for `qstring parse`.
    #[serde(default)]
    pub output: OutputFormat,
    /// Decoding options.
    #[serde(default)]
    pub codec: CodecOptions,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qstring")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QstringConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<QstringConfig> {
    if !path.exists() {
        let default_cfg = QstringConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: QstringConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
