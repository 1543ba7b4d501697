use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use watchtrack_core::SearchSession;
use watchtrack_models::{CatalogItem, MediaKind};
use watchtrack_remote::TrendWindow;

pub async fn run_search(
    query: String,
    kind: Option<MediaKind>,
    trending: Option<String>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    if let Some(window) = trending {
        return run_trending(&ctx, &window, output).await;
    }

    let mut session = SearchSession::new(ctx.state.clone());
    let Some((ticket, query)) = session.begin(&query) else {
        // Blank input never reaches the search endpoint: prior results are
        // cleared and the popular sample is shown instead
        return run_recommendations(&ctx, output).await;
    };

    let spinner = output.spinner(&format!("Searching for '{}'...", query));
    let results = match kind {
        Some(kind) => ctx.catalog.search_kind(kind, &query).await,
        None => ctx.catalog.search(&query).await,
    };
    spinner.finish_and_clear();
    session.complete(ticket, results);

    let mut results = ctx.state.search_results();
    results.truncate(ctx.config.ui.page_size);

    if !output.is_human() {
        output.json(&serde_json::to_value(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        output.info(format!("No results for '{}'", query));
        return Ok(());
    }

    output.println(render_catalog_table(&results));
    output.println("Add one with: watchtrack add <CATALOG-ID> [--kind movie|series]");
    Ok(())
}

async fn run_trending(ctx: &AppContext, window: &str, output: &Output) -> Result<()> {
    let window = match window {
        "day" | "today" => TrendWindow::Day,
        "week" => TrendWindow::Week,
        other => {
            output.error(format!("Invalid trending window: {}. Use 'day' or 'week'", other));
            return Ok(());
        }
    };

    let spinner = output.spinner("Fetching trending titles...");
    let items = ctx.catalog.trending(window, ctx.config.ui.page_size).await;
    spinner.finish_and_clear();

    if !output.is_human() {
        output.json(&serde_json::to_value(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        output.warn("Could not fetch trending titles");
        return Ok(());
    }

    output.println("Trending:");
    output.println(render_catalog_table(&items));
    output.println("Add one with: watchtrack add <CATALOG-ID> [--kind movie|series]");
    Ok(())
}

async fn run_recommendations(ctx: &AppContext, output: &Output) -> Result<()> {
    let spinner = output.spinner("Finding popular titles...");
    let recommendations = ctx
        .catalog
        .recommendations(ctx.config.ui.recommendations)
        .await;
    spinner.finish_and_clear();

    if !output.is_human() {
        output.json(&serde_json::to_value(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        output.warn("Could not fetch recommendations");
        return Ok(());
    }

    output.println("Popular right now:");
    output.println(render_catalog_table(&recommendations));
    output.println("Add one with: watchtrack add <CATALOG-ID> [--kind movie|series]");
    Ok(())
}

fn render_catalog_table(items: &[CatalogItem]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(["Catalog ID", "Kind", "Title", "Year", "Rating"]);

    for item in items {
        let rating = item
            .vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        table.add_row([
            Cell::new(item.id),
            Cell::new(item.media_kind.label()),
            Cell::new(&item.title),
            Cell::new(item.year().unwrap_or("-")),
            Cell::new(rating),
        ]);
    }
    table.to_string()
}
