use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Origin of the REST API.
    pub api_url: Url,
    /// Public origin of the web app, used to build hash-route return URLs.
    pub app_url: Url,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("FOX_API_URL").unwrap_or_else(|_| "http://localhost:8000".into());
        let app_url = std::env::var("FOX_APP_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let timeout_secs = std::env::var("FOX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15);
        Ok(Self {
            api_url: Url::parse(&api_url).context("FOX_API_URL")?,
            app_url: Url::parse(&app_url).context("FOX_APP_URL")?,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
