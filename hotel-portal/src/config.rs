//! Portal configuration
//!
//! Read from the environment (after `.env` is loaded); command-line flags
//! override individual values.

use std::path::PathBuf;

use hotel_client::ClientConfig;
use hotel_client::config::DEFAULT_TIMEOUT_SECS;
use hotel_client::preferences::Language;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_DATA_DIR: &str = ".hotel-portal";

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// Backend API root (`HOTEL_API_BASE_URL`)
    pub base_url: String,
    /// Session, preferences, logs and exports (`HOTEL_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Request timeout in seconds (`HOTEL_REQUEST_TIMEOUT_SECS`)
    pub timeout_secs: u64,
    /// Used until a language is saved (`HOTEL_DEFAULT_LANGUAGE`)
    pub default_language: Language,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_language: Language::default(),
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            base_url: get("HOTEL_API_BASE_URL").unwrap_or(defaults.base_url),
            data_dir: get("HOTEL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            timeout_secs: get("HOTEL_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            default_language: get("HOTEL_DEFAULT_LANGUAGE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_language),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> PortalConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PortalConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from(&[]);
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.default_language, Language::Es);
    }

    #[test]
    fn test_environment_values() {
        let config = from(&[
            ("HOTEL_API_BASE_URL", "https://api.marazul.test/api"),
            ("HOTEL_DATA_DIR", "/var/lib/portal"),
            ("HOTEL_REQUEST_TIMEOUT_SECS", "30"),
            ("HOTEL_DEFAULT_LANGUAGE", "EN"),
        ]);
        assert_eq!(config.base_url, "https://api.marazul.test/api");
        assert_eq!(config.log_dir(), PathBuf::from("/var/lib/portal/logs"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.client_config().timeout, 30);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = from(&[
            ("HOTEL_API_BASE_URL", "  "),
            ("HOTEL_REQUEST_TIMEOUT_SECS", "soon"),
            ("HOTEL_DEFAULT_LANGUAGE", "klingon"),
        ]);
        assert_eq!(config, PortalConfig::default());
    }
}
