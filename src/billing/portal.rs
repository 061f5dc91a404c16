use tracing::{instrument, warn};
use url::Url;

use super::routes::{hash_route_url, SUBSCRIPTION_ROUTE};
use super::services::portal_session;
use crate::error::Result;
use crate::state::AppContext;

/// State behind the "manage my subscription" button: asks the API for a billing
/// portal session whose return URL lands back on a client route.
#[derive(Debug, Clone)]
pub struct PortalRedirector {
    return_route: String,
    opening: bool,
    error: Option<String>,
}

impl Default for PortalRedirector {
    fn default() -> Self {
        Self::new(SUBSCRIPTION_ROUTE)
    }
}

impl PortalRedirector {
    pub fn new(return_route: impl Into<String>) -> Self {
        Self {
            return_route: return_route.into(),
            opening: false,
            error: None,
        }
    }

    pub fn return_url(&self, app_url: &Url) -> Url {
        hash_route_url(app_url, &self.return_route)
    }

    /// True while a portal session is being requested; the button stays disabled.
    pub fn is_opening(&self) -> bool {
        self.opening
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the provider URL to navigate to. Failures are kept as a visible
    /// message and also returned; nothing is retried.
    #[instrument(skip(self, ctx))]
    pub async fn open(&mut self, ctx: &AppContext) -> Result<Url> {
        self.opening = true;
        self.error = None;
        let return_url = self.return_url(&ctx.config.app_url);
        let outcome = portal_session(ctx, &return_url).await;
        self.opening = false;
        match outcome {
            Ok(portal) => Ok(portal.url),
            Err(e) => {
                warn!(error = %e, "billing portal unavailable");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
