//! unitgrade configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::GridFormat;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "unitgrade.toml";

/// Top-level unitgrade configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitgradeConfig {
    /// Submissions graded concurrently; 1 grades sequentially.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output format when the output path has no recognised extension.
    #[serde(default)]
    pub default_format: GridFormat,
}

fn default_parallelism() -> usize {
    1
}

impl Default for UnitgradeConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            default_format: GridFormat::default(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `unitgrade.toml` in the current directory
/// 2. `~/.config/unitgrade/config.toml`
///
/// Environment variable override: `UNITGRADE_PARALLELISM`.
pub fn load_config_from(path: Option<&Path>) -> Result<UnitgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => UnitgradeConfig::default(),
    };

    if let Ok(raw) = std::env::var("UNITGRADE_PARALLELISM") {
        config.parallelism = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid UNITGRADE_PARALLELISM: '{raw}'"))?;
    }

    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");
    Ok(config)
}

fn parse_config(content: &str) -> Result<UnitgradeConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("unitgrade"))
}
