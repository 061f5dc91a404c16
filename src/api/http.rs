//! Reqwest-backed API adapter: request serialisation, timeout, status mapping
//! and error-body decoding. Nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::{ApiRequest, FoxApi};
use crate::error::{ApiError, Result};
use crate::validation::FieldErrors;

const USER_AGENT: &str = concat!("fox-reviews/", env!("CARGO_PKG_VERSION"));

pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Joins keeping any path prefix of the base (`/api/v1` + `/posts`).
    fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.base.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

#[async_trait]
impl FoxApi for HttpApi {
    #[instrument(skip(self, request), fields(route = %request.route()))]
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.path)?;
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "response");

        if !status.is_success() {
            let err = map_status_error(status, &body, request.bearer.is_some());
            warn!(%status, error = %err, "request rejected");
            return Err(err);
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("invalid JSON body: {e}")))
    }
}

/// Turns a non-success response into an error, keeping whatever the body explains.
/// A 401 only means an expired session when a bearer token was sent; otherwise
/// (bad login credentials) the server's message is kept.
pub(crate) fn map_status_error(status: StatusCode, body: &[u8], authenticated: bool) -> ApiError {
    if status == StatusCode::UNAUTHORIZED && authenticated {
        return ApiError::Unauthorized;
    }

    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        let text = String::from_utf8_lossy(body).trim().to_string();
        return ApiError::rejected(status, text);
    };

    let mut fields = FieldErrors::new();
    let mut message = String::new();

    for key in ["detail", "message", "error"] {
        match json.get(key) {
            Some(Value::String(s)) if message.is_empty() => message = s.clone(),
            // FastAPI 422: [{"loc": ["body", "email"], "msg": "..."}]
            Some(Value::Array(items)) => {
                for item in items {
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .map(|f| match f {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        });
                    let msg = item.get("msg").and_then(Value::as_str);
                    if let (Some(field), Some(msg)) = (field, msg) {
                        fields.push(field, msg);
                    }
                }
            }
            _ => {}
        }
    }

    // {"errors": {"siret": ["..."]}}
    if let Some(Value::Object(map)) = json.get("errors") {
        for (field, msgs) in map {
            match msgs {
                Value::String(s) => fields.push(field.clone(), s.clone()),
                Value::Array(list) => {
                    for m in list.iter().filter_map(Value::as_str) {
                        fields.push(field.clone(), m);
                    }
                }
                _ => {}
            }
        }
    }

    if message.is_empty() && !fields.is_empty() {
        message = "Certains champs ont été refusés par le serveur.".into();
    }

    ApiError::Rejected {
        status,
        message,
        fields,
    }
}
