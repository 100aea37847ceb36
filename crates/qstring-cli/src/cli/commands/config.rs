//! `qstring config` – print the effective configuration.

use anyhow::Result;
use qstring_core::config::{self, QstringConfig};

pub fn run_config(cfg: &QstringConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
