use crate::context::AppContext;
use crate::output::Output;
use chrono::Utc;
use color_eyre::Result;
use serde_json::json;
use watchtrack_core::{completion_percent, format_clock, relative_label};
use watchtrack_models::{SeriesExtents, TrackedItem, TrackedItemPatch};

pub async fn run_show(id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    let spinner = output.spinner("Fetching item...");
    let item = ctx.store.get(&session, id).await;
    spinner.finish_and_clear();

    let Some(mut item) = item else {
        output.error("Item not found");
        return Ok(());
    };

    let spinner = output.spinner("Fetching catalog details...");
    let catalog_item = ctx
        .catalog
        .item(item.catalog_id, Some(item.media_kind))
        .await;
    let extents = if item.is_series() {
        Some(ctx.catalog.series_extents(item.catalog_id).await)
    } else {
        None
    };
    spinner.finish_and_clear();

    // Older rows may predate duration capture; backfill from the catalog
    if item.total_duration_seconds.is_none() {
        if let Some(duration) = catalog_item.as_ref().and_then(|c| c.duration_seconds()) {
            let patch = TrackedItemPatch {
                total_duration_seconds: Some(duration),
                ..TrackedItemPatch::default()
            };
            if let Some(updated) = ctx.store.update(&session, &item.id, &patch).await {
                item = updated;
            }
        }
    }
    ctx.state.select_item(Some(item.clone()));

    let vote_average = catalog_item.as_ref().and_then(|c| c.vote_average);
    let episode_runtime = catalog_item
        .as_ref()
        .and_then(|c| c.episode_runtime_seconds);

    if !output.is_human() {
        output.json(&json!({
            "item": item,
            "extents": extents,
            "vote_average": vote_average,
        }));
        return Ok(());
    }

    render(&item, extents, vote_average, episode_runtime, output);
    Ok(())
}

fn render(
    item: &TrackedItem,
    extents: Option<SeriesExtents>,
    vote_average: Option<f64>,
    episode_runtime: Option<u64>,
    output: &Output,
) {
    output.println(format!("{} ({})", item.title, item.media_kind.label()));
    output.println(format!("  Id:         {}", item.id));
    output.println(format!("  Status:     {}", item.status.label()));

    let percent = completion_percent(item.position_seconds, item.total_duration_seconds);
    match item.total_duration_seconds {
        Some(total) => {
            output.println(format!(
                "  Progress:   {} {} / {} ({}%)",
                render_bar(percent),
                format_clock(item.position_seconds),
                format_clock(total),
                percent
            ));
        }
        None => {
            output.println(format!(
                "  Progress:   {}",
                format_clock(item.position_seconds)
            ));
        }
    }

    if let (Some(season), Some(episode)) = (item.current_season, item.current_episode) {
        match extents {
            Some(extents) => output.println(format!(
                "  Episode:    S{}E{} (of {} seasons, ~{} episodes/season)",
                season,
                episode,
                extents.max_seasons,
                extents.episodes_per_season()
            )),
            None => output.println(format!("  Episode:    S{}E{}", season, episode)),
        }
    }
    if let Some(runtime) = episode_runtime {
        output.println(format!(
            "  Ep length:  {}",
            format_clock(runtime)
        ));
    }
    if let Some(vote) = vote_average {
        output.println(format!("  Rating:     {:.1}/10", vote));
    }
    if let Some(last_watched) = item.last_watched_at {
        output.println(format!(
            "  Watched:    {}",
            relative_label(last_watched, Utc::now())
        ));
    }
    if let Some(notes) = item.notes.as_deref().filter(|n| !n.is_empty()) {
        output.println(format!("  Notes:      {}", notes));
    }
}

fn render_bar(percent: u8) -> String {
    const WIDTH: usize = 20;
    let filled = (percent as usize * WIDTH) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
