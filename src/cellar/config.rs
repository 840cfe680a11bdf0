//! # Configuration
//!
//! Cellar configuration is managed by [`confique`], which layers environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CELLAR_LOG`, `CELLAR_WHITE_ZONE`, `CELLAR_RED_ZONE`.
//! 2. **Config file**: `<data dir>/cellar.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! The data directory itself comes from `CELLAR_HOME`, or the OS data
//! directory (via the `directories` crate) when unset.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `log_level` | `warn` | Default tracing filter when `RUST_LOG` is unset |
//! | `allocation.white_keywords` | `["white", "blanc"]` | Words marking a wine as white |
//! | `allocation.white_zone_keyword` | `White` | Zone-name substring for white wines |
//! | `allocation.red_zone_keyword` | `Red` | Zone-name substring for red wines |

use crate::error::{CellarError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "cellar.toml";
pub const HOME_ENV: &str = "CELLAR_HOME";

/// Configuration for cellar, stored in `cellar.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CellarConfig {
    /// Default log filter (e.g. "warn", "info", "cellar=debug").
    #[config(env = "CELLAR_LOG", default = "warn")]
    pub log_level: String,

    /// How new wines are matched to zones.
    #[config(nested)]
    pub allocation: AllocationConfig,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationConfig {
    /// Case-insensitive words that mark a wine as white. Anything else is red.
    #[config(default = ["white", "blanc"])]
    pub white_keywords: Vec<String>,

    /// Zone names containing this text hold white wines (case-sensitive).
    #[config(env = "CELLAR_WHITE_ZONE", default = "White")]
    pub white_zone_keyword: String,

    /// Zone names containing this text hold red wines (case-sensitive).
    #[config(env = "CELLAR_RED_ZONE", default = "Red")]
    pub red_zone_keyword: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            white_keywords: vec!["white".to_string(), "blanc".to_string()],
            white_zone_keyword: "White".to_string(),
            red_zone_keyword: "Red".to_string(),
        }
    }
}

impl Default for CellarConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            allocation: AllocationConfig::default(),
        }
    }
}

impl CellarConfig {
    /// Load config for the given data directory. A missing file means defaults.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        CellarConfig::builder()
            .env()
            .file(data_dir.as_ref().join(CONFIG_FILENAME))
            .load()
            .map_err(|e| CellarError::Config(e.to_string()))
    }

    /// A commented sample `cellar.toml` listing every setting.
    pub fn template() -> String {
        confique::toml::template::<CellarConfig>(confique::toml::FormatOptions::default())
    }
}

/// Resolve the data directory: `CELLAR_HOME` wins, then the OS default.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("", "", "cellar")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CellarError::Config("could not determine a data directory".to_string()))
}
