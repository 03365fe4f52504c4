//! Runtime Configuration
//!
//! Compile-time defaults with `localStorage` overrides.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, API_URL_KEY, LOG_LEVEL_KEY};

pub const DEFAULT_API_BASE: &str = "https://wavegerpython.onrender.com/api";
pub const APPLE_MUSIC_API_BASE: &str = "https://api.music.apple.com/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, no trailing slash
    pub api_base: String,
    /// Timeout for chart fetches (the backend may hit the upstream chart API)
    pub chart_timeout_ms: u32,
    /// Timeout for every other request
    pub request_timeout_ms: u32,
    pub apple_music_storefront: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("WAVEGER_API_URL")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
            chart_timeout_ms: 15_000,
            request_timeout_ms: 30_000,
            apple_music_storefront: "us".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then whatever the user saved in storage
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut config = Self::default();
        if let Some(url) = store.get(API_URL_KEY).filter(|u| !u.trim().is_empty()) {
            config.api_base = url;
        }
        if let Some(level) = store.get(LOG_LEVEL_KEY).filter(|l| !l.trim().is_empty()) {
            config.log_level = level;
        }
        config.api_base = normalize_base(&config.api_base);
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_defaults() {
        let store = MemoryStorage::new();
        let config = AppConfig::load(&store);
        assert!(!config.api_base.ends_with('/'));
        assert_eq!(config.chart_timeout_ms, 15_000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_overrides_and_trims() {
        let store = MemoryStorage::new();
        store.set(API_URL_KEY, " http://localhost:5001/api/ ");
        store.set(LOG_LEVEL_KEY, "debug");
        let config = AppConfig::load(&store);
        assert_eq!(config.api_base, "http://localhost:5001/api");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.url("/chart"), "http://localhost:5001/api/chart");
        assert_eq!(config.url("auth/login"), "http://localhost:5001/api/auth/login");
    }

    #[test]
    fn test_blank_override_ignored() {
        let store = MemoryStorage::new();
        store.set(API_URL_KEY, "   ");
        assert_eq!(AppConfig::load(&store).api_base, AppConfig::default().api_base.trim_end_matches('/'));
    }
}
