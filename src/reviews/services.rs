use tracing::instrument;
use uuid::Uuid;

use super::dto::{Review, VisibilityStats};
use crate::api::{call, ApiRequest};
use crate::error::Result;
use crate::state::AppContext;

#[instrument(skip(ctx))]
pub async fn company_reviews(ctx: &AppContext, company_id: Uuid) -> Result<Vec<Review>> {
    let mut request = ApiRequest::get(format!("/entreprises/{company_id}/reviews"));
    if let Some(session) = &ctx.session {
        request = request.auth(session);
    }
    call(ctx.api(), request).await
}

/// Only reviews the backend classified as genuine five-star ones.
pub async fn decrypted_reviews(ctx: &AppContext, company_id: Uuid) -> Result<Vec<Review>> {
    let reviews = company_reviews(ctx, company_id).await?;
    Ok(reviews
        .into_iter()
        .filter(Review::is_decrypted_five_star)
        .collect())
}

#[instrument(skip(ctx))]
pub async fn visibility(ctx: &AppContext, company_id: Uuid) -> Result<VisibilityStats> {
    let session = ctx.session()?;
    call(
        ctx.api(),
        ApiRequest::get(format!("/entreprises/{company_id}/visibility")).auth(session),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::FakeApi;

    #[tokio::test]
    async fn test_decrypted_filter() {
        let id = Uuid::nil();
        let api = Arc::new(FakeApi::new().respond(
            &format!("GET /entreprises/{id}/reviews"),
            json!({"data": [
                {"id": "5e0f8a2b-1c3d-4e5f-8a9b-0c1d2e3f4a51", "author_name": "A", "rating": 5,
                 "source": "google", "decrypted": true, "published_at": "2026-02-10T08:30:00Z"},
                {"id": "5e0f8a2b-1c3d-4e5f-8a9b-0c1d2e3f4a52", "author_name": "B", "rating": 4,
                 "source": "google", "decrypted": true, "published_at": "2026-02-11T08:30:00Z"},
                {"id": "5e0f8a2b-1c3d-4e5f-8a9b-0c1d2e3f4a53", "author_name": "C", "rating": 5,
                 "source": "facebook", "published_at": "2026-02-12T08:30:00Z"}
            ]}),
        ));
        let ctx = AppContext::fake(api);
        let reviews = decrypted_reviews(&ctx, id).await.expect("reviews");
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author_name, "A");
    }
}
