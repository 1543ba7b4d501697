use clap::{ArgAction, Parser, Subcommand};
use commands::{add, auth, clear, config, list, profile, remove, search, show, track};
use watchtrack_models::{MediaKind, WatchStatus};

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchtrack")]
#[command(about = "WatchTrack - Track your watch progress across movies and series")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Running without a subcommand lands on the list view
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your tracked list (the default view)
    #[command(long_about = "Show your tracked items: status, progress, season/episode, and when you last watched. Most recently watched first, never-watched items last.")]
    List {
        /// Only show items with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<WatchStatus>,
    },
    /// Search the catalog, or browse recommendations
    #[command(long_about = "Search the metadata catalog for movies and series. With no query, shows a sampled set of currently popular titles instead. Use --trending to browse what is trending over a day or week window.")]
    Search {
        /// Search text; omit to browse recommendations
        query: Vec<String>,

        /// Only search movies
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "series")]
        movies: bool,

        /// Only search series
        #[arg(long, action = ArgAction::SetTrue)]
        series: bool,

        /// Browse trending titles instead: --trending or --trending=day
        #[arg(long, value_name = "WINDOW", num_args = 0..=1, default_missing_value = "week", conflicts_with_all = ["query", "movies", "series"])]
        trending: Option<String>,
    },
    /// Add a catalog title to your list
    #[command(long_about = "Add a title to your tracked list by its catalog id (shown by 'search'). New items start as plan-to-watch at position 0; the total duration is fetched from the catalog at add time.")]
    Add {
        /// Catalog id of the title to add
        catalog_id: u64,

        /// Media kind; probed movie-then-series when omitted
        #[arg(long, value_parser = parse_kind)]
        kind: Option<MediaKind>,
    },
    /// Show one tracked item in detail
    #[command(long_about = "Show one tracked item: progress, season/episode ceilings, catalog rating, notes. Fetches and stores the total duration when it is missing.")]
    Show {
        /// Tracked item id
        id: String,
    },
    /// Record progress on a tracked item
    #[command(long_about = "Record progress on one tracked item and stamp it as watched now. Position can be set absolutely (--time), nudged (--nudge +30s, --nudge -1m), or left alone while changing status, season/episode, or notes.")]
    Track {
        /// Tracked item id
        id: String,

        /// Set the playback position, as H:MM:SS or MM:SS
        #[arg(long, value_name = "CLOCK")]
        time: Option<String>,

        /// Adjust the position, e.g. +30s, -1m, 90 (may be repeated)
        #[arg(long, value_name = "DELTA", allow_hyphen_values = true, value_parser = parse_nudge)]
        nudge: Vec<i64>,

        /// Set the current season (series only)
        #[arg(long)]
        season: Option<u32>,

        /// Set the current episode (series only)
        #[arg(long)]
        episode: Option<u32>,

        /// Set the status
        #[arg(long, value_parser = parse_status, conflicts_with = "cycle")]
        status: Option<WatchStatus>,

        /// Advance the status to the next one in the cycle
        #[arg(long, action = ArgAction::SetTrue)]
        cycle: bool,

        /// Replace the notes (500 characters max)
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a tracked item
    #[command(long_about = "Delete one tracked item from your list. Asks for confirmation unless --yes is given. This cannot be undone.")]
    Rm {
        /// Tracked item id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Sign in with email and password
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account
    Signup {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show or update your auth profile
    #[command(long_about = "Show your auth profile, update the username/phone metadata, or send yourself a password-reset email.")]
    Profile {
        /// Set the username
        #[arg(long)]
        username: Option<String>,

        /// Set the phone number
        #[arg(long)]
        phone: Option<String>,

        /// Send a password-reset email to your account address
        #[arg(long, action = ArgAction::SetTrue)]
        reset_password: bool,
    },
    /// Inspect or change configuration
    #[command(long_about = "Manage configuration for WatchTrack: the catalog API key and the backend project. Running without a subcommand shows the current configuration with secrets masked.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Forget the stored session credentials
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show full configuration including masked values
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set the catalog API key
    Catalog {
        /// Catalog API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Set the backend project URL and publishable key
    Backend {
        /// Backend project URL (if not provided, will prompt)
        #[arg(long)]
        project_url: Option<String>,

        /// Backend publishable key (if not provided, will prompt)
        #[arg(long)]
        publishable_key: Option<String>,
    },
}

fn parse_status(s: &str) -> Result<WatchStatus, String> {
    s.parse()
}

fn parse_kind(s: &str) -> Result<MediaKind, String> {
    s.parse()
}

/// "+30s", "-1m", "90" → signed seconds.
fn parse_nudge(s: &str) -> Result<i64, String> {
    let (body, scale) = match s.strip_suffix(&['s', 'S'][..]) {
        Some(rest) => (rest, 1),
        None => match s.strip_suffix(&['m', 'M'][..]) {
            Some(rest) => (rest, 60),
            None => (s, 1),
        },
    };
    body.parse::<i64>()
        .map(|n| n * scale)
        .map_err(|_| format!("Invalid adjustment: {}. Use forms like +30s, -1m, or 90", s))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let command = cli.command.unwrap_or(Commands::List { status: None });
    match command {
        Commands::List { status } => list::run_list(status, &output).await,
        Commands::Search {
            query,
            movies,
            series,
            trending,
        } => {
            let kind = if movies {
                Some(MediaKind::Movie)
            } else if series {
                Some(MediaKind::Series)
            } else {
                None
            };
            search::run_search(query.join(" "), kind, trending, &output).await
        }
        Commands::Add { catalog_id, kind } => add::run_add(catalog_id, kind, &output).await,
        Commands::Show { id } => show::run_show(&id, &output).await,
        Commands::Track {
            id,
            time,
            nudge,
            season,
            episode,
            status,
            cycle,
            notes,
        } => {
            let edits = track::Edits {
                time,
                nudges: nudge,
                season,
                episode,
                status,
                cycle,
                notes,
            };
            track::run_track(&id, edits, &output).await
        }
        Commands::Rm { id, yes } => remove::run_remove(&id, yes, &output).await,
        Commands::Login { email } => auth::run_login(email, &output).await,
        Commands::Signup { email } => auth::run_signup(email, &output).await,
        Commands::Logout => auth::run_logout(&output).await,
        Commands::Profile {
            username,
            phone,
            reset_password,
        } => profile::run_profile(username, phone, reset_password, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { yes } => clear::run_clear(yes, &output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nudge() {
        assert_eq!(parse_nudge("+30s").unwrap(), 30);
        assert_eq!(parse_nudge("-30s").unwrap(), -30);
        assert_eq!(parse_nudge("-1m").unwrap(), -60);
        assert_eq!(parse_nudge("2m").unwrap(), 120);
        assert_eq!(parse_nudge("90").unwrap(), 90);
        assert!(parse_nudge("fast").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
