//! Outbound HTTP to the air-quality provider.
//!
//! All remote calls in the pipeline go through [`Gateway::get_json`],
//! which applies a fixed 10-second timeout and, when a forwarding-proxy
//! credential is configured, transparently rewrites every request to go
//! through the proxy endpoint. Callers never branch on proxy mode.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Transport-level failure of one provider call. Nothing below this
/// boundary ever panics past it.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection, timeout, HTTP status, or body-decode failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// Anything the transport cannot classify.
    #[error("provider failure: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        let transport = err.is_timeout()
            || err.is_connect()
            || err.is_status()
            || err.is_decode()
            || err.is_request();
        if transport {
            GatewayError::Request(err)
        } else {
            GatewayError::Unknown(err.to_string())
        }
    }
}

/// Forwarding-proxy credentials, injected at construction. Presence of
/// these settings is the only proxy toggle; there is no global flag.
#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub endpoint: String,
    pub api_key: String,
    pub country: String,
}

pub struct Gateway {
    client: Client,
    base_url: String,
    proxy: Option<ProxySettings>,
}

impl Gateway {
    pub fn new(base_url: String, proxy: Option<ProxySettings>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            base_url,
            proxy,
        }
    }

    /// Fetches `{base_url}/{path}` and parses the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!("GET {}", url);

        let request = match &self.proxy {
            Some(proxy) => self.client.get(&proxy.endpoint).query(&[
                ("api_key", proxy.api_key.as_str()),
                ("url", url.as_str()),
                ("country_code", proxy.country.as_str()),
            ]),
            None => self.client.get(&url),
        };

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}
