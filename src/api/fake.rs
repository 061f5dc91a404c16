use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiRequest, FoxApi};
use crate::error::{ApiError, Result};

/// In-memory `FoxApi`: canned answers per `"METHOD /path"` and a log of what was sent.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<String, Result<Value, (StatusCode, String)>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, route: &str, body: Value) -> Self {
        if let Ok(mut map) = self.responses.lock() {
            map.insert(route.to_string(), Ok(body));
        }
        self
    }

    pub fn fail(self, route: &str, status: StatusCode, message: &str) -> Self {
        if let Ok(mut map) = self.responses.lock() {
            map.insert(route.to_string(), Err((status, message.to_string())));
        }
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|v| v.len()).unwrap_or(0)
    }
}

#[async_trait]
impl FoxApi for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let route = request.route();
        let authenticated = request.bearer.is_some();
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(request);
        }
        let answer = self
            .responses
            .lock()
            .ok()
            .and_then(|map| map.get(&route).cloned());
        match answer {
            Some(Ok(body)) => Ok(body),
            Some(Err((StatusCode::UNAUTHORIZED, _))) if authenticated => Err(ApiError::Unauthorized),
            Some(Err((status, message))) => Err(ApiError::rejected(status, message)),
            None => Err(ApiError::rejected(
                StatusCode::NOT_FOUND,
                format!("no fake response for {route}"),
            )),
        }
    }
}
