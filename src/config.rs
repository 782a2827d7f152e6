use crate::gateway::ProxySettings;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Name of the environment variable holding the forwarding-proxy access
/// key. Its presence is what enables proxy mode.
pub const PROXY_KEY_ENV: &str = "AIRBOT_PROXY_KEY";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub proxy: ProxyConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String, // GIOŚ REST root
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProxyConfig {
    pub endpoint: String, // Forwarding endpoint, used only when the key env var is set
    pub country: String,  // Fixed country_code query parameter
}

impl Config {
    /// Loads config.toml from the working directory.
    /// If it doesn't exist, creates a default one.
    pub fn load() -> Self {
        let config_path = "config.toml";

        if let Ok(content) = fs::read_to_string(config_path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => warn!("Failed to parse config.toml: {}. Using defaults.", e),
            }
        }

        let default_config = Config {
            api: ApiConfig {
                base_url: "https://api.gios.gov.pl/pjp-api/rest".to_string(),
            },
            proxy: ProxyConfig {
                endpoint: "http://api.scraperapi.com".to_string(),
                country: "pl".to_string(),
            },
        };

        // Save default config to disk for the user to edit later
        let toml_string = toml::to_string_pretty(&default_config).unwrap();
        if fs::write(config_path, toml_string).is_err() {
            warn!("Could not write default config.toml to disk.");
        }

        info!("Loaded default configuration.");
        default_config
    }

    /// Proxy settings for the gateway; `None` unless the key env var is
    /// set, so a plain deployment talks to the provider directly.
    pub fn proxy_settings(&self) -> Option<ProxySettings> {
        std::env::var(PROXY_KEY_ENV).ok().map(|key| ProxySettings {
            endpoint: self.proxy.endpoint.clone(),
            api_key: key,
            country: self.proxy.country.clone(),
        })
    }
}
