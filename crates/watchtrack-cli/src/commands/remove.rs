use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use dialoguer::Confirm;

pub async fn run_remove(id: &str, yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    let spinner = output.spinner("Fetching item...");
    let item = ctx.store.get(&session, id).await;
    spinner.finish_and_clear();

    let Some(item) = item else {
        output.error("Item not found");
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}'? This cannot be undone",
                item.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let spinner = output.spinner("Deleting...");
    let deleted = ctx.store.delete(&session, &item.id).await;
    spinner.finish_and_clear();

    if deleted {
        ctx.state.remove_item(&item.id);
        output.success(format!("Deleted '{}'", item.title));
    } else {
        output.error("Failed to delete item");
    }
    Ok(())
}
