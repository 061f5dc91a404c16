//! News posts shown on the marketing pages.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::instrument;

use crate::api::{call, ApiRequest};
use crate::error::Result;
use crate::state::AppContext;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

/// Newest first.
#[instrument(skip(ctx))]
pub async fn list_posts(ctx: &AppContext) -> Result<Vec<Post>> {
    let mut posts: Vec<Post> = call(ctx.api(), ApiRequest::get("/posts")).await?;
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(posts)
}
