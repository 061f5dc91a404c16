use tracing::{info, instrument};

use super::dto::ContactForm;
use crate::api::ApiRequest;
use crate::error::Result;
use crate::state::AppContext;
use crate::validation::Schema;

#[instrument(skip(ctx, form))]
pub async fn send_message(ctx: &AppContext, form: ContactForm) -> Result<()> {
    let form = form.parse()?;
    ctx.api()
        .send(ApiRequest::post("/contact/").json(&form)?)
        .await?;
    info!("contact message sent");
    Ok(())
}
