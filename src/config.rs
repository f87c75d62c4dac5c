//! Persistent user settings.
//!
//! Stored as pretty JSON at `<config dir>/popdash/config.json`. A missing or
//! unreadable file silently yields the defaults; command-line flags override
//! whatever is stored.

use crate::error::{Result, ResultExt as _};
use crate::theme::ColorTheme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no data path is configured.
pub const DEFAULT_DATA_FILE: &str = "data/us-population-2010-2019-reshaped.csv";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Population CSV to load at startup
    pub data_path: PathBuf,
    /// Theme selected when the dashboard opens
    pub default_theme: ColorTheme,
    /// Whether to also write logs to rolling files in the data directory
    pub log_to_file: bool,
    /// Rows shown in the ranked table of the text report (`None` shows all)
    pub table_row_limit: Option<usize>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            default_theme: ColorTheme::default(),
            log_to_file: false,
            table_row_limit: None,
        }
    }
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("popdash")
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}

pub fn load_app_config() -> AppSettings {
    load_app_config_from(&get_config_path())
}

pub fn load_app_config_from(path: &Path) -> AppSettings {
    if path.exists()
        && let Ok(content) = std::fs::read_to_string(path)
    {
        match serde_json::from_str::<AppSettings>(&content) {
            Ok(settings) => return settings,
            Err(e) => tracing::warn!("Ignoring unreadable config {}: {e}", path.display()),
        }
    }
    AppSettings::default()
}

/// # Errors
///
/// Returns error if the config directory cannot be created or the file cannot be written.
pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    save_app_config_to(settings, &get_config_path())
}

/// # Errors
///
/// Returns error if the parent directory cannot be created or the file cannot be written.
pub fn save_app_config_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
