use std::time::Duration;

use crate::gemini::{
    GeminiConfig,
    DEFAULT_BASE_URL,
    DEFAULT_MODEL,
};

pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            dark_mode: false,
        }
    }
}

impl SettingsData {
    /// The key from settings, else the first non-empty environment variable.
    pub fn effective_api_key(&self) -> Option<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    fn resolve_api_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let api_key = self.effective_api_key()?;
        let model = if self.model.trim().is_empty() { DEFAULT_MODEL } else { self.model.trim() };
        let base_url =
            if self.base_url.trim().is_empty() { DEFAULT_BASE_URL } else { self.base_url.trim() };

        Some(GeminiConfig {
            api_key,
            model: model.to_string(),
            base_url: base_url.to_string(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_key_wins_over_environment() {
        let settings = SettingsData { api_key: " from-settings ".to_string(), ..Default::default() };
        let key = settings.resolve_api_key(|_| Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("from-settings"));
    }

    #[test]
    fn test_environment_fallback_order() {
        let settings = SettingsData::default();
        let key = settings.resolve_api_key(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("legacy".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("legacy"));
        assert_eq!(settings.resolve_api_key(|_| None), None);
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let settings: SettingsData = serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.request_timeout_secs.is_none());
    }
}
