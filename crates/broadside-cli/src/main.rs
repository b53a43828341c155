use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use broadside_lib::source::DataSource;
use broadside_lib::{Aggregator, Archetype, DirectorySource, HttpSource};

mod commands;

use commands::builds::BuildsCommand;

const DATA_URL_ENV: &str = "BROADSIDE_DATA_URL";
const DATA_DIR_ENV: &str = "BROADSIDE_DATA_DIR";

#[derive(Parser, Debug)]
#[command(author, version, about = "Broadside game data and build planning utilities")]
struct Cli {
    /// Base URL of the remote data store.
    #[arg(long, global = true)]
    data_url: Option<String>,

    /// Local directory with one {table}.json file per collection.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Localization language for names and descriptions.
    #[arg(long, global = true, default_value = "en")]
    language: String,

    /// Override the directory used for persisted builds.
    #[arg(long, global = true)]
    builds_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a snapshot and report per-collection counts.
    Sync,
    /// List ships, optionally filtered and sorted.
    Ships(commands::ships::ShipsArgs),
    /// List weapons, optionally filtered.
    Weapons(commands::weapons::WeaponsArgs),
    /// List crew units, optionally filtered.
    Crews(commands::crews::CrewsArgs),
    /// Rank ships against each combat archetype.
    Archetypes {
        /// Rank for a single archetype instead of all six.
        #[arg(long)]
        archetype: Option<Archetype>,
        /// How many ships to list per archetype.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Compare up to three ships side by side.
    Compare {
        /// Ship names to compare.
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Manage persisted builds.
    Builds {
        #[command(subcommand)]
        command: BuildsCommand,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let Cli {
        data_url,
        data_dir,
        language,
        builds_dir,
        command,
    } = Cli::parse();

    match command {
        Command::Sync => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::sync::handle_sync(&snapshot)
        }
        Command::Ships(args) => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::ships::handle_ships(&snapshot, args)
        }
        Command::Weapons(args) => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::weapons::handle_weapons(&snapshot, args)
        }
        Command::Crews(args) => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::crews::handle_crews(&snapshot, args)
        }
        Command::Archetypes { archetype, limit } => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::archetypes::handle_archetypes(&snapshot, archetype, limit)
        }
        Command::Compare { names } => {
            let snapshot = load_snapshot(&data_url, &data_dir, &language)?;
            commands::compare::handle_compare(&snapshot, &names)
        }
        Command::Builds { command } => {
            commands::builds::handle_builds(builds_dir.as_deref(), command)
        }
    }
}

/// Resolve the row-store from flags, then environment. A directory wins
/// over a URL since it is the more deliberate override.
fn resolve_source(
    data_url: &Option<String>,
    data_dir: &Option<PathBuf>,
) -> Result<Box<dyn DataSource>> {
    if let Some(dir) = data_dir {
        return Ok(Box::new(DirectorySource::new(dir.clone())));
    }
    if let Some(url) = data_url {
        return Ok(Box::new(HttpSource::new(url.clone())));
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(Box::new(DirectorySource::new(dir)));
    }
    if let Ok(url) = std::env::var(DATA_URL_ENV) {
        return Ok(Box::new(HttpSource::new(url)));
    }
    bail!("no data source configured; pass --data-url or --data-dir (or set {DATA_URL_ENV} / {DATA_DIR_ENV})")
}

fn load_snapshot(
    data_url: &Option<String>,
    data_dir: &Option<PathBuf>,
    language: &str,
) -> Result<std::sync::Arc<broadside_lib::AppData>> {
    let source = resolve_source(data_url, data_dir)?;
    let mut aggregator = Aggregator::new(source, language.to_string());
    let snapshot = aggregator.load();
    if !snapshot.failed_tables.is_empty() {
        eprintln!(
            "warning: some collections were unavailable: {}",
            snapshot.failed_tables.join(", ")
        );
    }
    Ok(snapshot)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
