use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a tracked item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    /// Currently being watched
    #[serde(rename = "watching")]
    Watching,
    /// Finished watching
    #[serde(rename = "completed")]
    Completed,
    /// Paused, may come back to it
    #[serde(rename = "on-hold")]
    OnHold,
    /// Added but not started (the status every new item gets)
    #[serde(rename = "plan-to-watch")]
    PlanToWatch,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 4] = [
        WatchStatus::Watching,
        WatchStatus::Completed,
        WatchStatus::OnHold,
        WatchStatus::PlanToWatch,
    ];

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
            WatchStatus::OnHold => "On Hold",
            WatchStatus::PlanToWatch => "Plan to Watch",
        }
    }

    /// Wire name, as stored in the row store.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::OnHold => "on-hold",
            WatchStatus::PlanToWatch => "plan-to-watch",
        }
    }

    /// The next status in the quick-edit cycle.
    pub fn next(&self) -> WatchStatus {
        match self {
            WatchStatus::Watching => WatchStatus::Completed,
            WatchStatus::Completed => WatchStatus::OnHold,
            WatchStatus::OnHold => WatchStatus::PlanToWatch,
            WatchStatus::PlanToWatch => WatchStatus::Watching,
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "watching" => Ok(WatchStatus::Watching),
            "completed" => Ok(WatchStatus::Completed),
            "on-hold" | "onhold" | "hold" => Ok(WatchStatus::OnHold),
            "plan-to-watch" | "plantowatch" | "plan" => Ok(WatchStatus::PlanToWatch),
            _ => Err(format!(
                "Invalid status: {}. Use watching, completed, on-hold, or plan-to-watch",
                s
            )),
        }
    }
}
