use tracing::{info, instrument};

use super::dto::AccountUpdateForm;
use crate::api::{call, ApiRequest};
use crate::auth::PublicUser;
use crate::error::Result;
use crate::state::AppContext;
use crate::validation::Schema;

#[instrument(skip(ctx, form))]
pub async fn update_account(ctx: &AppContext, form: AccountUpdateForm) -> Result<PublicUser> {
    let session = ctx.session()?;
    let form = form.parse()?;
    let changes_password = form.changes_password();
    let user: PublicUser = call(
        ctx.api(),
        ApiRequest::put("/me").json(&form)?.auth(session),
    )
    .await?;
    info!(user_id = %user.id, changes_password, "account updated");
    Ok(user)
}
