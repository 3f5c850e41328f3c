use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MatchbookError, Result};
use crate::models::MatchingParameters;
use crate::similarity::Algorithm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_date_tolerance")]
    pub date_tolerance_days: u32,
    #[serde(default = "default_amount_tolerance")]
    pub amount_tolerance_percent: u32,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_detail_limit")]
    pub detail_limit: usize,
}

fn default_date_tolerance() -> u32 {
    3
}

fn default_amount_tolerance() -> u32 {
    1
}

fn default_algorithm() -> Algorithm {
    Algorithm::WordOverlap
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_preview_rows() -> usize {
    5
}

fn default_detail_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_tolerance_days: default_date_tolerance(),
            amount_tolerance_percent: default_amount_tolerance(),
            algorithm: default_algorithm(),
            delimiter: default_delimiter(),
            preview_rows: default_preview_rows(),
            detail_limit: default_detail_limit(),
        }
    }
}

impl Settings {
    pub fn matching_parameters(&self) -> MatchingParameters {
        MatchingParameters {
            date_tolerance_days: self.date_tolerance_days,
            amount_tolerance_percent: self.amount_tolerance_percent,
            algorithm: self.algorithm,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("matchbook")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unparseable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| MatchbookError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
