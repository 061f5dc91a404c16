use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::dto::{Category, Company, CompanyForm, CompanyPatch};
use crate::api::{call, ApiRequest};
use crate::error::Result;
use crate::search::{Page, SearchFilters};
use crate::state::AppContext;
use crate::validation::Schema;

#[instrument(skip(ctx))]
pub async fn categories(ctx: &AppContext) -> Result<Vec<Category>> {
    call(ctx.api(), ApiRequest::get("/categories")).await
}

#[instrument(skip(ctx, form))]
pub async fn create_company(ctx: &AppContext, form: CompanyForm) -> Result<Company> {
    let session = ctx.session()?;
    let form = form.parse()?;
    let company: Company = call(
        ctx.api(),
        ApiRequest::post("/entreprises").json(&form)?.auth(session),
    )
    .await?;
    info!(company_id = %company.id, "company created");
    Ok(company)
}

#[instrument(skip(ctx))]
pub async fn my_companies(ctx: &AppContext) -> Result<Vec<Company>> {
    let session = ctx.session()?;
    call(ctx.api(), ApiRequest::get("/entreprises/me").auth(session)).await
}

#[instrument(skip(ctx))]
pub async fn get_company(ctx: &AppContext, id: Uuid) -> Result<Company> {
    call(ctx.api(), ApiRequest::get(format!("/entreprises/{id}"))).await
}

/// Sends only the given fields. An empty patch sends nothing and re-reads the
/// current company instead.
#[instrument(skip(ctx, patch))]
pub async fn update_company(ctx: &AppContext, id: Uuid, patch: CompanyPatch) -> Result<Company> {
    let session = ctx.session()?;
    let patch = patch.parse()?;
    if patch.is_empty() {
        debug!(company_id = %id, "nothing to update");
        return get_company(ctx, id).await;
    }
    let company: Company = call(
        ctx.api(),
        ApiRequest::patch(format!("/entreprises/{id}"))
            .json(&patch)?
            .auth(session),
    )
    .await?;
    info!(company_id = %company.id, "company updated");
    Ok(company)
}

/// Saves an edited copy of `before`, sending only what changed.
pub async fn save_edits(ctx: &AppContext, before: &Company, after: CompanyForm) -> Result<Company> {
    let after = after.parse()?;
    update_company(ctx, before.id, CompanyPatch::diff(before, &after)).await
}

#[instrument(skip(ctx))]
pub async fn delete_company(ctx: &AppContext, id: Uuid) -> Result<()> {
    let session = ctx.session()?;
    ctx.api()
        .send(ApiRequest::delete(format!("/entreprises/{id}")).auth(session))
        .await?;
    info!(company_id = %id, "company deleted");
    Ok(())
}

#[instrument(skip(ctx, filters))]
pub async fn search_companies(ctx: &AppContext, filters: SearchFilters) -> Result<Page<Company>> {
    let filters = filters.parse()?;
    call(
        ctx.api(),
        ApiRequest::get("/entreprises").query(filters.to_query()),
    )
    .await
}
