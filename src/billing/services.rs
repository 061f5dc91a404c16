use tracing::{info, instrument};
use url::Url;

use super::dto::{CheckoutForm, CheckoutSession, PortalRequest, PortalSession, Plan, Subscription};
use super::routes::{hash_route_url, CHECKOUT_CANCEL_ROUTE, CHECKOUT_SUCCESS_ROUTE};
use crate::api::{call, ApiRequest};
use crate::error::Result;
use crate::state::AppContext;

/// `None` while the account has never subscribed.
#[instrument(skip(ctx))]
pub async fn subscription(ctx: &AppContext) -> Result<Option<Subscription>> {
    let session = ctx.session()?;
    call(ctx.api(), ApiRequest::get("/billing/subscription").auth(session)).await
}

/// Checkout form pre-filled with the app's own success and cancel pages.
pub fn checkout_form(ctx: &AppContext, plan: Plan, duration_months: u8) -> CheckoutForm {
    CheckoutForm {
        plan: plan.to_string(),
        duration_months: f64::from(duration_months),
        success_url: hash_route_url(&ctx.config.app_url, CHECKOUT_SUCCESS_ROUTE).to_string(),
        cancel_url: hash_route_url(&ctx.config.app_url, CHECKOUT_CANCEL_ROUTE).to_string(),
    }
}

#[instrument(skip(ctx, form))]
pub async fn start_checkout(ctx: &AppContext, form: CheckoutForm) -> Result<CheckoutSession> {
    let session = ctx.session()?;
    let request = form.into_request()?;
    let checkout: CheckoutSession = call(
        ctx.api(),
        ApiRequest::post("/billing/checkout").json(&request)?.auth(session),
    )
    .await?;
    info!(plan = %request.plan, months = request.duration_months, "checkout session created");
    Ok(checkout)
}

#[instrument(skip(ctx))]
pub async fn portal_session(ctx: &AppContext, return_url: &Url) -> Result<PortalSession> {
    let session = ctx.session()?;
    let body = PortalRequest {
        return_url: return_url.to_string(),
    };
    call(
        ctx.api(),
        ApiRequest::post("/billing/portal").json(&body)?.auth(session),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::FakeApi;
    use crate::auth::Session;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_checkout_uses_app_routes() {
        let api = Arc::new(FakeApi::new().respond(
            "POST /billing/checkout",
            json!({"url": "https://checkout.stripe.com/c/pay/cs_test_1", "session_id": "cs_test_1"}),
        ));
        let ctx = AppContext::fake(api.clone()).with_session(Session::new("tok"));
        let form = checkout_form(&ctx, Plan::Premium, 12);
        let checkout = start_checkout(&ctx, form).await.expect("checkout");
        assert_eq!(checkout.session_id.as_deref(), Some("cs_test_1"));

        let body = api.sent()[0].body.clone().unwrap();
        assert_eq!(body["plan"], "premium");
        assert_eq!(body["duration_months"], 12);
        assert_eq!(
            body["cancel_url"],
            "http://localhost:3000/#/checkout/cancel"
        );
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_duration_locally() {
        let api = Arc::new(FakeApi::new());
        let ctx = AppContext::fake(api.clone()).with_session(Session::new("tok"));
        let form = checkout_form(&ctx, Plan::Basic, 13);
        let err = start_checkout(&ctx, form).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        assert_eq!(api.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_no_subscription_yet() {
        let api = Arc::new(FakeApi::new().respond("GET /billing/subscription", json!(null)));
        let ctx = AppContext::fake(api).with_session(Session::new("tok"));
        assert_eq!(subscription(&ctx).await.expect("subscription"), None);
    }
}
