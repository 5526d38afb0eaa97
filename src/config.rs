//! Build-time and runtime configuration for the catalog API.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Where the catalog API lives and what to load on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
    #[serde(default)]
    pub startup_song_ids: Vec<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, Vec::new())
    }
}

impl AppConfig {
    pub fn new(api_base: impl Into<String>, startup_song_ids: Vec<u64>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            startup_song_ids,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Values baked in at build time (`WY_API_BASE`, `WY_STARTUP_SONGS`) are the
    /// only source on wasm. Native builds let the same variables override them at
    /// runtime.
    pub fn from_env() -> Self {
        let mut api_base = option_env!("WY_API_BASE")
            .unwrap_or(DEFAULT_API_BASE)
            .to_string();
        let mut song_ids = option_env!("WY_STARTUP_SONGS")
            .map(parse_id_list)
            .unwrap_or_default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(value) = std::env::var("WY_API_BASE") {
                if !value.trim().is_empty() {
                    api_base = value;
                }
            }
            if let Ok(value) = std::env::var("WY_STARTUP_SONGS") {
                song_ids = parse_id_list(&value);
            }
        }

        Self::new(api_base, song_ids)
    }

    /// Absolute URL for an API path such as `song/url`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a comma separated id list, skipping anything that is not a number.
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AppConfig::new("http://music.local:3000/", Vec::new());
        assert_eq!(config.endpoint("song/url"), "http://music.local:3000/song/url");
        assert_eq!(config.endpoint("/lyric"), "http://music.local:3000/lyric");
    }

    #[test]
    fn blank_base_falls_back_to_default() {
        let config = AppConfig::new("   ", Vec::new());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn id_list_skips_garbage() {
        assert_eq!(parse_id_list("1, 22,abc,,333"), vec![1, 22, 333]);
        assert!(parse_id_list("").is_empty());
    }
}
