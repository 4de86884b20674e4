use chrono::Local;
use clap::{Parser, Subcommand};

use aozora_api::catalog::CatalogClient;
use aozora_api::jikan::JikanClient;
use aozora_api::traits::{CatalogEntry, ListQuery};
use aozora_core::bookmarks::{SavedEntry, Shelf, SqliteStore, NS_BOOKMARKS, NS_WATCHLIST};
use aozora_core::config::AppConfig;
use aozora_core::error::AozoraError;
use aozora_core::format;
use aozora_core::listing::{fetch_details, Listing};
use aozora_core::schedule::format_slot_time;
use aozora_core::view::ScheduleBoard;

#[derive(Parser)]
#[command(name = "aozora", about = "Anime catalog client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalog.
    Search { query: String },
    /// List episodes for an anime.
    Episodes {
        mal_id: u64,
        /// Fetch every page, not just the first.
        #[arg(long)]
        all: bool,
    },
    /// Show the weekly airing schedule.
    Schedule {
        /// Week offset: 0 = this week, -1 = last, 1 = next.
        #[arg(long, default_value_t = 0)]
        week: i64,
        /// Single day (mon..sun) instead of the whole week.
        #[arg(long)]
        day: Option<String>,
    },
    /// Show full metadata for an anime.
    Info { mal_id: u64 },
    /// Manage bookmarks and the watch list.
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Save an anime.
    Add {
        mal_id: u64,
        /// Use the watch list instead of bookmarks.
        #[arg(long)]
        watchlist: bool,
    },
    /// Remove a saved anime.
    Rm {
        mal_id: u64,
        #[arg(long)]
        watchlist: bool,
    },
    /// List saved anime.
    Ls {
        #[arg(long)]
        watchlist: bool,
    },
}

fn parse_day(s: &str) -> Option<u8> {
    match s.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(1),
        "tue" | "tuesday" => Some(2),
        "wed" | "wednesday" => Some(3),
        "thu" | "thursday" => Some(4),
        "fri" | "friday" => Some(5),
        "sat" | "saturday" => Some(6),
        "sun" | "sunday" => Some(7),
        _ => None,
    }
}

fn namespace(watchlist: bool) -> &'static str {
    if watchlist {
        NS_WATCHLIST
    } else {
        NS_BOOKMARKS
    }
}

fn print_entry_line(entry: &CatalogEntry) {
    let meta = entry.meta();
    let mut line = entry.title.clone();
    if let Some(status) = meta.status.as_deref() {
        line.push_str(&format!("  [{}]", format::airing_status(status)));
    }
    if !meta.genres.is_empty() {
        line.push_str(&format!("  ({})", meta.genres.join(", ")));
    }
    if let Some(published) = &entry.published {
        line.push_str(&format!("  {}", format::relative_time(published)));
    }
    println!("{line}");
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), AozoraError> {
    let catalog = CatalogClient::new(&config.catalog.endpoint, &config.catalog.blog_id)?;

    match cli.command {
        Command::Search { query } => {
            let mut results = Listing::new(ListQuery::search(query), config.pages.search_limit);
            results.load_more(&catalog).await?;
            if results.entries().is_empty() {
                println!("no results");
            }
            for entry in results.entries() {
                print_entry_line(entry);
            }
        }
        Command::Episodes { mal_id, all } => {
            let mut episodes =
                Listing::new(ListQuery::episodes(mal_id), config.pages.episode_limit);
            episodes.load_more(&catalog).await?;
            while all && episodes.has_more() {
                episodes.load_more(&catalog).await?;
            }
            for entry in episodes.episodes_sorted() {
                let label = entry.meta().episode.unwrap_or_else(|| "?".into());
                println!("ep {label:>5}  {}", entry.title);
            }
            if episodes.has_more() {
                println!("(more available; pass --all)");
            }
        }
        Command::Schedule { week, day } => {
            let today = Local::now().date_naive();
            let mut board = ScheduleBoard::new(today);
            board.set_week_offset(week);
            if let Some(ref day) = day {
                let parsed = parse_day(day)
                    .ok_or_else(|| AozoraError::Parse(format!("unknown day: {day}")))?;
                board.select_day(parsed);
            }

            let mut ongoing = Listing::new(
                ListQuery::anime_info().with_status("ongoing"),
                config.pages.schedule_limit,
            );
            ongoing.load_more(&catalog).await?;
            while ongoing.has_more() {
                ongoing.load_more(&catalog).await?;
            }
            board.loaded(ongoing.entries().to_vec());

            let days = if day.is_some() {
                vec![board.selected(today)]
            } else {
                board.week(today).to_vec()
            };
            for schedule in days {
                println!(
                    "{} {}",
                    format::day_label(schedule.day),
                    schedule.date.format("%Y-%m-%d")
                );
                if schedule.entries.is_empty() {
                    println!("  -");
                }
                for scheduled in &schedule.entries {
                    let time = format_slot_time(&scheduled.slot.time)
                        .unwrap_or_else(|| scheduled.slot.time.clone());
                    println!("  {time:>8}  {}", scheduled.entry.title);
                }
            }
        }
        Command::Info { mal_id } => {
            let jikan = JikanClient::new(&config.jikan.endpoint)?;
            let details = fetch_details(&jikan, mal_id).await?;
            let full = &details.full;

            println!("{} (#{})", full.title, full.mal_id);
            if let Some(english) = full.title_english.as_deref() {
                println!("  {english}");
            }
            if let Some(score) = full.score {
                println!("  score {score}");
            }
            if let Some(episodes) = full.episodes {
                println!("  {episodes} episodes");
            }
            if !full.genres.is_empty() {
                let names: Vec<&str> = full.genres.iter().map(|g| g.name.as_str()).collect();
                println!("  {}", names.join(", "));
            }
            if let Some(synopsis) = full.synopsis.as_deref() {
                println!("\n{synopsis}");
            }
            if !details.characters.is_empty() {
                println!("\ncharacters:");
                for edge in details.characters.iter().take(10) {
                    let role = edge.role.as_deref().unwrap_or("-");
                    println!("  {}  ({role})", edge.character.name);
                }
            }
            if let Some(stats) = &details.statistics {
                println!(
                    "\nwatching {}, completed {}, planned {}",
                    stats.watching, stats.completed, stats.plan_to_watch
                );
            }
        }
        Command::Bookmark { action } => {
            let shelf = Shelf::new(SqliteStore::open(&AppConfig::ensure_db_path()?)?);
            match action {
                BookmarkAction::Add { mal_id, watchlist } => {
                    let entry = catalog.entry_by_mal_id(mal_id).await?.ok_or_else(|| {
                        AozoraError::Parse(format!("no catalog post for mal_id {mal_id}"))
                    })?;
                    let saved = SavedEntry {
                        mal_id,
                        title: entry.title.clone(),
                        image_url: entry.image_url.clone(),
                        path: entry.path.clone(),
                    };
                    shelf.add(namespace(watchlist), &saved)?;
                    println!("saved: {}", saved.title);
                }
                BookmarkAction::Rm { mal_id, watchlist } => {
                    shelf.remove(namespace(watchlist), mal_id)?;
                    println!("removed #{mal_id}");
                }
                BookmarkAction::Ls { watchlist } => {
                    let entries = shelf.list(namespace(watchlist))?;
                    if entries.is_empty() {
                        println!("empty");
                    }
                    for entry in entries {
                        println!("#{:<8} {}", entry.mal_id, entry.title);
                    }
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AozoraError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aozora=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    tracing::debug!(config = %AppConfig::config_path().display(), "starting");
    run(cli, config).await
}
