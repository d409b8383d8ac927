// Game configuration loaded from an optional JSON file

use crate::game::loading::SplashLayout;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "BROADSIDE_CONFIG";
/// Environment variable overriding the resource directory
pub const RESOURCES_ENV: &str = "BROADSIDE_RESOURCES";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "broadside.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Root of the fonts/, images/ and sounds/ directories
    pub resource_dir: PathBuf,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// JSON manifest replacing the built-in one
    pub manifest: Option<PathBuf>,
    /// Turn pacing delays into no-ops
    pub skip_delays: bool,
    pub splash: SplashLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("Resources"),
            window_title: "Battle Ships".to_string(),
            window_width: 800,
            window_height: 600,
            manifest: None,
            skip_delays: false,
            splash: SplashLayout::default(),
        }
    }
}

impl GameConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration from the environment
    ///
    /// Uses the file named by `BROADSIDE_CONFIG`, else `broadside.json` if it
    /// exists, else the defaults. `BROADSIDE_RESOURCES` then overrides the
    /// resource directory.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let resources = std::env::var_os(RESOURCES_ENV).map(PathBuf::from);
        Self::resolve(explicit, Path::new(DEFAULT_CONFIG_FILE), resources)
    }

    fn resolve(
        explicit: Option<PathBuf>,
        fallback: &Path,
        resources: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None if fallback.is_file() => {
                info!("Loading config from {}", fallback.display());
                Self::from_file(fallback)?
            }
            None => Self::default(),
        };

        if let Some(dir) = resources {
            config.resource_dir = dir;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::resolve(None, &dir.path().join("broadside.json"), None).unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.resource_dir, PathBuf::from("Resources"));
        assert!(!config.skip_delays);
    }

    #[test]
    fn test_fallback_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broadside.json");
        fs::write(&path, r#"{ "skip_delays": true, "splash": { "bar_width": 200 } }"#).unwrap();

        let config = GameConfig::resolve(None, &path, None).unwrap();

        assert!(config.skip_delays);
        assert_eq!(config.splash.bar_width, 200);
        assert_eq!(config.splash.bar_height, 66);
        assert_eq!(config.window_width, 800);
    }

    #[test]
    fn test_explicit_file_wins_and_env_overrides_resources() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("broadside.json");
        fs::write(&fallback, r#"{ "window_title": "fallback" }"#).unwrap();
        let explicit = dir.path().join("custom.json");
        fs::write(
            &explicit,
            r#"{ "window_title": "custom", "resource_dir": "assets" }"#,
        )
        .unwrap();

        let config = GameConfig::resolve(
            Some(explicit),
            &fallback,
            Some(PathBuf::from("/opt/broadside")),
        )
        .unwrap();

        assert_eq!(config.window_title, "custom");
        assert_eq!(config.resource_dir, PathBuf::from("/opt/broadside"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = GameConfig::resolve(
            Some(dir.path().join("absent.json")),
            &dir.path().join("broadside.json"),
            None,
        );
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broadside.json");
        fs::write(&path, "{ not json").unwrap();

        let result = GameConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
