//! Player preferences that survive a reload.
//!
//! The browser build keeps them in local storage; native builds write a small
//! JSON file into the platform data directory.

use crate::error::SettingsError;
use crate::store::PlayMode;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "wymusic.player_settings";

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_VOLUME: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Output volume in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub play_mode: PlayMode,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            play_mode: PlayMode::default(),
        }
    }
}

impl PlayerSettings {
    pub fn normalized(mut self) -> Self {
        self.volume = normalize_volume(self.volume);
        self
    }
}

/// Clamp a volume into `[0, 1]`, accepting legacy percent values.
pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    if value > 1.0 {
        value /= 100.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<PlayerSettings, SettingsError> {
    match LocalStorage::get::<PlayerSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings.normalized()),
        Err(_) => Ok(PlayerSettings::default()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), SettingsError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<PlayerSettings, SettingsError> {
    load_settings_from(&settings_path()?)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path()?, &settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<std::path::PathBuf, SettingsError> {
    let dir = dirs::data_dir()
        .ok_or(SettingsError::NoDataDir)?
        .join("wymusic");
    Ok(dir.join(SETTINGS_FILE))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings_from(path: &std::path::Path) -> Result<PlayerSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str::<PlayerSettings>(&json)?.normalized()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(PlayerSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_settings_to(
    path: &std::path::Path,
    settings: &PlayerSettings,
) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_normalized() {
        assert_eq!(normalize_volume(0.4), 0.4);
        assert_eq!(normalize_volume(80.0), 0.8);
        assert_eq!(normalize_volume(-1.0), 0.0);
        assert_eq!(normalize_volume(f64::NAN), DEFAULT_VOLUME);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: PlayerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PlayerSettings::default());

        let settings: PlayerSettings =
            serde_json::from_str(r#"{"volume":0.25,"play_mode":"SingleLoop"}"#).unwrap();
        assert_eq!(settings.play_mode, PlayMode::SingleLoop);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_file_loads_defaults_and_saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        assert_eq!(load_settings_from(&path).unwrap(), PlayerSettings::default());

        let settings = PlayerSettings {
            volume: 0.3,
            play_mode: PlayMode::Random,
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(load_settings_from(&path), Err(SettingsError::Json(_))));
    }
}
