use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use super::dto::{
    AuthResponse, ForgotPasswordForm, LoginForm, PublicUser, RefreshRequest, RegisterForm,
    ResetPasswordForm, ResetRequested,
};
use super::session::Session;
use crate::api::{call, ApiRequest};
use crate::error::{ApiError, Result};
use crate::state::AppContext;
use crate::validation::Schema;

#[instrument(skip(ctx, form))]
pub async fn login(ctx: &AppContext, form: LoginForm) -> Result<Session> {
    let form = form.parse()?;
    let resp: AuthResponse = call(ctx.api(), ApiRequest::post("/auth/login").json(&form)?).await?;
    info!(user_id = %resp.user.id, "logged in");
    Ok(Session::from(resp))
}

#[instrument(skip(ctx, form))]
pub async fn register(ctx: &AppContext, form: RegisterForm) -> Result<Session> {
    let form = form.parse()?;
    let resp: AuthResponse =
        call(ctx.api(), ApiRequest::post("/auth/register").json(&form)?).await?;
    info!(user_id = %resp.user.id, "account created");
    Ok(Session::from(resp))
}

/// Exchanges the session's refresh token for a new pair.
#[instrument(skip(ctx, session))]
pub async fn refresh(ctx: &AppContext, session: &Session) -> Result<Session> {
    let token = session.refresh_token.as_deref().ok_or(ApiError::Unauthorized)?;
    let body = RefreshRequest { refresh_token: token };
    let resp: AuthResponse = call(ctx.api(), ApiRequest::post("/auth/refresh").json(&body)?).await?;
    let mut next = Session::from(resp);
    if next.refresh_token.is_none() {
        next.refresh_token = session.refresh_token.clone();
    }
    Ok(next)
}

/// Always ends in the same outcome for known and unknown addresses.
#[instrument(skip(ctx, form))]
pub async fn request_password_reset(
    ctx: &AppContext,
    form: ForgotPasswordForm,
) -> Result<ResetRequested> {
    let form = form.parse()?;
    let request = ApiRequest::post("/auth/forgot-password").json(&form)?;
    match ctx.api().send(request).await {
        Ok(_) => Ok(ResetRequested::EmailSentIfAccountExists),
        Err(ApiError::Rejected { status, .. }) if status == StatusCode::NOT_FOUND => {
            Ok(ResetRequested::EmailSentIfAccountExists)
        }
        Err(e) => {
            warn!(error = %e, "password reset request failed");
            Err(e)
        }
    }
}

#[instrument(skip(ctx, form))]
pub async fn reset_password(ctx: &AppContext, form: ResetPasswordForm) -> Result<()> {
    let form = form.parse()?;
    ctx.api()
        .send(ApiRequest::post("/auth/reset-password").json(&form)?)
        .await?;
    info!("password reset");
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn me(ctx: &AppContext) -> Result<PublicUser> {
    let session = ctx.session()?;
    call(ctx.api(), ApiRequest::get("/me").auth(session)).await
}
