//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default relief API address
pub const DEFAULT_API_ADDRESS: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the API address
pub const API_ADDRESS_ENV: &str = "RELIEF_API_ADDRESS";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the relief API
    pub api_base_url: Option<String>,
    /// Page-level CSRF token, preferred over the cookie
    pub csrf_token: Option<String>,
    /// Raw `Cookie` header for the session, e.g. `csrftoken=...; sessionid=...`
    pub cookie: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "relief", "relief-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the API address: environment first, then the file, then the default
    pub fn api_address(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.csrf_token.is_none());
        assert!(config.cookie.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("https://relief.example.org".to_string()),
            csrf_token: Some("meta-token".to_string()),
            cookie: Some("csrftoken=abc; sessionid=xyz".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.api_base_url,
            Some("https://relief.example.org".to_string())
        );
        assert_eq!(parsed.csrf_token, Some("meta-token".to_string()));
        assert_eq!(
            parsed.cookie,
            Some("csrftoken=abc; sessionid=xyz".to_string()),
        );
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // unknown fields are ignored
        let json = r#"{"api_base_url": "http://x", "theme": "dark"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url, Some("http://x".to_string()));
    }

    #[test]
    fn test_api_address_precedence() {
        let config = TuiConfig {
            api_base_url: Some("http://file".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.api_address(Some("http://env".to_string())),
            "http://env",
        );
        assert_eq!(config.api_address(Some("  ".to_string())), "http://file");
        assert_eq!(config.api_address(None), "http://file");
        assert_eq!(TuiConfig::default().api_address(None), DEFAULT_API_ADDRESS);
    }

    #[test]
    fn test_load_returns_ok() {
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
