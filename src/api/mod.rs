//! Transport seam. Services build an `ApiRequest`, hand it to a `FoxApi` and
//! decode the JSON they get back; `HttpApi` is the real network implementation.

pub mod fake;
pub mod http;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::session::Session;
use crate::error::{ApiError, Result};

pub use fake::FakeApi;
pub use http::HttpApi;

/// One call to the remote API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn auth(mut self, session: &Session) -> Self {
        self.bearer = Some(session.access_token.clone());
        self
    }

    /// `"METHOD /path"`, used in logs and by the fake.
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Anything able to execute an `ApiRequest`. One request per call, no retry.
#[async_trait]
pub trait FoxApi: Send + Sync {
    /// Returns the decoded JSON body, `Value::Null` for empty bodies.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

/// Unwraps `{"data": ...}` envelopes; bare payloads pass through.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    match serde_json::from_value::<Payload<T>>(value) {
        Ok(Payload::Wrapped { data }) => Ok(data),
        Ok(Payload::Bare(inner)) => Ok(inner),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// Sends and decodes in one step.
pub async fn call<T: DeserializeOwned>(api: &dyn FoxApi, request: ApiRequest) -> Result<T> {
    let value = api.send(request).await?;
    decode(value)
}
