//! Scene configuration
//!
//! Looked up in order:
//! 1. `<config dir>/parallax_background/scene.json` (per user)
//! 2. `assets/config/scene.json` (shipped with the build)
//! 3. built-in defaults
//!
//! Every field is optional in the JSON; missing ones fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "parallax_background";
pub const BUNDLED_CONFIG_PATH: &str = "assets/config/scene.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window_title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: [u8; 3],
    pub asset_dir: PathBuf,
    /// Manifest JSON to use instead of the built-in one
    pub manifest_path: Option<PathBuf>,
    pub target_fps: u32,
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            window_title: "Parallax Scrolling Background".to_string(),
            width: 800,
            height: 600,
            background_color: [255, 255, 255],
            asset_dir: PathBuf::from("assets"),
            manifest_path: None,
            target_fps: 60,
            screenshot_dir: None,
        }
    }
}

impl SceneConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the first config file that exists, or defaults when none does
    ///
    /// A file that exists but cannot be parsed is an error, not a fallback.
    pub fn load(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in candidates {
            if path.exists() {
                let config = Self::load_from_file(path)?;
                return Ok((config, Some(path.clone())));
            }
        }
        Ok((SceneConfig::default(), None))
    }

    /// Standard lookup locations, user config first
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join(APP_DIR_NAME).join("scene.json"));
        }
        locations.push(PathBuf::from(BUNDLED_CONFIG_PATH));
        locations
    }

    /// Where screenshots go when none is configured
    pub fn screenshot_dir(&self) -> PathBuf {
        self.screenshot_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .map(|p| p.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from("./screenshots"))
        })
    }
}

/// Errors that can occur while reading the configuration
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{}_{}_{}", APP_DIR_NAME, name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{ "width": 1280, "target_fps": 30 }"#).unwrap();

        assert_eq!(config.width, 1280);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.height, 600);
        assert_eq!(config.background_color, [255, 255, 255]);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_load_picks_first_existing_file() {
        let dir = temp_dir("first_existing");
        let missing = dir.join("missing.json");
        let present = dir.join("scene.json");
        fs::write(&present, r#"{ "window_title": "Glacier" }"#).unwrap();

        let (config, source) = SceneConfig::load(&[missing, present.clone()]).unwrap();
        assert_eq!(config.window_title, "Glacier");
        assert_eq!(source, Some(present));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = temp_dir("no_files");
        let (config, source) = SceneConfig::load(&[dir.join("nope.json")]).unwrap();

        assert_eq!(config, SceneConfig::default());
        assert!(source.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = temp_dir("broken");
        let path = dir.join("scene.json");
        fs::write(&path, "{ width: ").unwrap();

        let result = SceneConfig::load(&[path]);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_explicit_screenshot_dir_wins() {
        let config = SceneConfig {
            screenshot_dir: Some(PathBuf::from("/tmp/shots")),
            ..SceneConfig::default()
        };
        assert_eq!(config.screenshot_dir(), PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config: SceneConfig =
            serde_json::from_str(include_str!("../assets/config/scene.json")).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.manifest_path, Some(PathBuf::from("assets/config/manifest.json")));
    }

    #[test]
    fn test_bundled_location_is_last() {
        let locations = SceneConfig::default_locations();
        assert_eq!(locations.last(), Some(&PathBuf::from(BUNDLED_CONFIG_PATH)));
    }
}
