use thiserror::Error;

/// Failures surfaced by the music catalog service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures while loading or saving player preferences.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[cfg(target_arch = "wasm32")]
    #[error("local storage error: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),
}
