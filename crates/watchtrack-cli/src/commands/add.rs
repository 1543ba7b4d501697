use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use watchtrack_models::{MediaKind, NewTrackedItem};

pub async fn run_add(catalog_id: u64, kind: Option<MediaKind>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    let spinner = output.spinner("Looking up the catalog...");
    let catalog_item = ctx.catalog.item(catalog_id, kind).await;
    spinner.finish_and_clear();

    let Some(catalog_item) = catalog_item else {
        output.error(format!("Catalog id {} not found", catalog_id));
        return Ok(());
    };

    let new_item = NewTrackedItem::from_catalog(
        &session.user.id,
        &catalog_item,
        ctx.catalog.image_url(catalog_item.poster_path.as_deref()),
        ctx.catalog.image_url(catalog_item.backdrop_path.as_deref()),
    );

    let spinner = output.spinner("Adding to your list...");
    let created = ctx.store.insert(&session, &new_item).await;
    spinner.finish_and_clear();

    match created {
        Some(item) => {
            if !output.is_human() {
                output.json(&serde_json::to_value(&item)?);
                return Ok(());
            }
            output.success(format!(
                "Added '{}' ({}) as {}, id {}",
                item.title,
                item.media_kind.label(),
                item.status.label(),
                item.id
            ));
            ctx.state.insert_item(item);
        }
        None => output.error("Failed to add item"),
    }
    Ok(())
}
