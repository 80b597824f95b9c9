use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BomboError, Result};

pub const MAPPING_ENV: &str = "BOMBO_MAPPING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_mapping_path")]
    pub mapping_path: String,
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_mapping_path() -> String {
    config_dir().join("mapping.json").to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mapping_path: default_mapping_path(),
            default_format: OutputFormat::default(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("bombo")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Read settings from `path`; a missing or unreadable file gives defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| BomboError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

fn resolve_mapping_path(env_value: Option<String>, settings: &Settings) -> PathBuf {
    match env_value {
        Some(p) if !p.trim().is_empty() => PathBuf::from(shellexpand_path(p.trim())),
        _ => PathBuf::from(shellexpand_path(&settings.mapping_path)),
    }
}

/// Mapping file location: `BOMBO_MAPPING` if set, else the settings file.
pub fn mapping_path() -> PathBuf {
    resolve_mapping_path(std::env::var(MAPPING_ENV).ok(), &load_settings())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            mapping_path: "/etc/bombo/mapping.json".to_string(),
            default_format: OutputFormat::Json,
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("settings.json"));
        assert_eq!(s, Settings::default());
        assert!(s.mapping_path.ends_with("mapping.json"));
        assert_eq!(s.default_format, OutputFormat::Table);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"default_format": "json"}"#).unwrap();
        assert_eq!(s.default_format, OutputFormat::Json);
        assert_eq!(s.mapping_path, default_mapping_path());
    }

    #[test]
    fn test_env_overrides_settings() {
        let settings = Settings {
            mapping_path: "/from/settings.json".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            resolve_mapping_path(Some("/from/env.json".into()), &settings),
            PathBuf::from("/from/env.json")
        );
        assert_eq!(
            resolve_mapping_path(Some("  ".into()), &settings),
            PathBuf::from("/from/settings.json")
        );
        assert_eq!(resolve_mapping_path(None, &settings), PathBuf::from("/from/settings.json"));
    }

    #[test]
    fn test_shellexpand_leaves_absolute_paths() {
        assert_eq!(shellexpand_path("/tmp/mapping.json"), "/tmp/mapping.json");
    }
}
