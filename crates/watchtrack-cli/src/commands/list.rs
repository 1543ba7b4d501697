use crate::context::AppContext;
use crate::output::Output;
use chrono::Utc;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use watchtrack_core::{completion_percent, format_clock, relative_label};
use watchtrack_models::{TrackedItem, WatchStatus};

pub async fn run_list(status: Option<WatchStatus>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    let spinner = output.spinner("Fetching your list...");
    let items = ctx.store.list(&session).await;
    spinner.finish_and_clear();

    // The fetch replaces the cached list wholesale
    ctx.state.replace_items(items);

    let items: Vec<TrackedItem> = ctx
        .state
        .items()
        .into_iter()
        .filter(|item| status.map_or(true, |wanted| item.status == wanted))
        .collect();

    if !output.is_human() {
        output.json(&serde_json::to_value(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        match status {
            Some(wanted) => output.info(format!("Nothing with status {}", wanted.label())),
            None => output.info("Your list is empty. Find something with 'watchtrack search'"),
        }
        return Ok(());
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(["ID", "Title", "Kind", "Status", "Progress", "S/E", "Last watched"]);

    for item in &items {
        let progress = match item.total_duration_seconds {
            Some(total) => format!(
                "{} / {} ({}%)",
                format_clock(item.position_seconds),
                format_clock(total),
                completion_percent(item.position_seconds, Some(total))
            ),
            None => format_clock(item.position_seconds),
        };
        let season_episode = match (item.current_season, item.current_episode) {
            (Some(season), Some(episode)) => format!("S{}E{}", season, episode),
            _ => "-".to_string(),
        };
        let last_watched = item
            .last_watched_at
            .map(|at| relative_label(at, now))
            .unwrap_or_else(|| "-".to_string());

        table.add_row([
            Cell::new(&item.id),
            Cell::new(&item.title),
            Cell::new(item.media_kind.label()),
            Cell::new(item.status.label()),
            Cell::new(progress),
            Cell::new(season_episode),
            Cell::new(last_watched),
        ]);
    }

    output.println(table.to_string());
    output.println(format!("{} item(s)", items.len()));
    Ok(())
}
