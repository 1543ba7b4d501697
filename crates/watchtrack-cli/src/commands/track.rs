use crate::context::AppContext;
use crate::output::Output;
use chrono::Utc;
use color_eyre::Result;
use watchtrack_core::{format_clock, parse_clock, ProgressEditor};
use watchtrack_models::{SeriesExtents, WatchStatus};

pub struct Edits {
    pub time: Option<String>,
    pub nudges: Vec<i64>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub status: Option<WatchStatus>,
    pub cycle: bool,
    pub notes: Option<String>,
}

impl Edits {
    fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.nudges.is_empty()
            && self.season.is_none()
            && self.episode.is_none()
            && self.status.is_none()
            && !self.cycle
            && self.notes.is_none()
    }
}

pub async fn run_track(id: &str, edits: Edits, output: &Output) -> Result<()> {
    if edits.is_empty() {
        output.warn("Nothing to record. Use --time, --nudge, --season, --episode, --status, --cycle, or --notes");
        return Ok(());
    }

    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    let spinner = output.spinner("Fetching item...");
    let item = ctx.store.get(&session, id).await;
    spinner.finish_and_clear();

    let Some(item) = item else {
        output.error("Item not found");
        return Ok(());
    };

    if !item.is_series() && (edits.season.is_some() || edits.episode.is_some()) {
        output.warn(format!("'{}' is a movie; ignoring --season/--episode", item.title));
    }

    // Season/episode input is bounded by what the catalog says exists
    let extents = if item.is_series() {
        ctx.catalog.series_extents(item.catalog_id).await
    } else {
        SeriesExtents::default()
    };

    let mut editor = ProgressEditor::new(&item, extents);
    if let Some(clock) = &edits.time {
        editor.set_position(parse_clock(clock));
    }
    for delta in &edits.nudges {
        editor.nudge(*delta);
    }
    if item.is_series() {
        if let Some(season) = edits.season {
            editor.set_season(season);
        }
        if let Some(episode) = edits.episode {
            editor.set_episode(episode);
        }
    }
    if let Some(status) = edits.status {
        editor.set_status(status);
    }
    if edits.cycle {
        editor.cycle_status();
    }
    if let Some(notes) = &edits.notes {
        editor.set_notes(notes);
    }

    let patch = editor.build_patch(Utc::now());

    let spinner = output.spinner("Saving progress...");
    let updated = ctx.store.update(&session, &item.id, &patch).await;
    spinner.finish_and_clear();

    let Some(updated) = updated else {
        output.error("Failed to save progress");
        return Ok(());
    };
    ctx.state.refresh_item(updated.clone());

    if !output.is_human() {
        output.json(&serde_json::to_value(&updated)?);
        return Ok(());
    }

    let mut summary = format!(
        "{}: {} at {}",
        updated.title,
        updated.status.label(),
        format_clock(updated.position_seconds)
    );
    if let (Some(season), Some(episode)) = (updated.current_season, updated.current_episode) {
        summary.push_str(&format!(", S{}E{}", season, episode));
    }
    if editor.percent() > 0 {
        summary.push_str(&format!(" ({}%)", editor.percent()));
    }
    output.success(summary);
    Ok(())
}
