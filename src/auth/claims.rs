use serde::{Deserialize, Serialize};

/// Type of JWT: access or refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

/// The part of the API's JWT payload the client reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,             // user ID
    pub exp: i64,                // expires at (unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,        // issued at (unix timestamp)
    #[serde(default)]
    pub kind: Option<TokenKind>, // token type, when the API sets it
}
