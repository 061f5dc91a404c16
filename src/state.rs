use std::sync::Arc;

use url::Url;

use crate::api::{FakeApi, FoxApi, HttpApi};
use crate::auth::session::Session;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// Everything a service call needs, passed explicitly instead of living in globals.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ClientConfig>,
    pub api: Arc<dyn FoxApi>,
    pub session: Option<Session>,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(ClientConfig::from_env()?);
        let api = Arc::new(HttpApi::new(config.api_url.clone(), config.timeout())?) as Arc<dyn FoxApi>;
        Ok(Self {
            config,
            api,
            session: None,
        })
    }

    pub fn from_parts(config: Arc<ClientConfig>, api: Arc<dyn FoxApi>) -> Self {
        Self {
            config,
            api,
            session: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// The current session, or `Unauthorized` when nobody is logged in.
    pub fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ApiError::Unauthorized)
    }

    pub fn api(&self) -> &dyn FoxApi {
        self.api.as_ref()
    }

    /// Context backed by the given fake, with local defaults for the URLs.
    pub fn fake(api: Arc<FakeApi>) -> Self {
        let config = Arc::new(ClientConfig {
            api_url: Url::parse("http://localhost:8000").expect("static url"),
            app_url: Url::parse("http://localhost:3000").expect("static url"),
            timeout_secs: 5,
        });
        Self::from_parts(config, api as Arc<dyn FoxApi>)
    }
}
