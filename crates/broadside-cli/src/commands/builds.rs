//! Builds command handler: CRUD over the persisted build store.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use broadside_lib::builds::BuildStore;
use broadside_lib::model::Build;
use broadside_lib::storage::FileStore;
use broadside_lib::Archetype;

#[derive(Subcommand, Debug)]
pub enum BuildsCommand {
    /// List saved builds grouped by archetype.
    List,
    /// Show a single build as JSON.
    Show { id: String },
    /// Create a new empty build for an archetype.
    New {
        #[arg(long, default_value = "brawler")]
        archetype: Archetype,
        /// Name for the new build.
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a build by id.
    Delete { id: String },
    /// Duplicate a build by id.
    Duplicate { id: String },
    /// Export builds as JSON to stdout.
    Export {
        /// Export only these build ids.
        #[arg(long, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Import builds from a JSON file.
    Import { file: std::path::PathBuf },
    /// Delete every saved build.
    Clear,
}

fn open_store(builds_dir: Option<&Path>) -> Result<BuildStore<FileStore>> {
    let storage = match builds_dir {
        Some(dir) => FileStore::open(dir),
        None => FileStore::open_default(),
    }
    .context("failed to open the build storage directory")?;
    Ok(BuildStore::open(storage))
}

pub fn handle_builds(builds_dir: Option<&Path>, command: BuildsCommand) -> Result<()> {
    let mut store = open_store(builds_dir)?;

    match command {
        BuildsCommand::List => {
            if store.is_empty() {
                println!("No saved builds.");
                return Ok(());
            }
            for (archetype, builds) in store.by_archetype() {
                if builds.is_empty() {
                    continue;
                }
                println!("{}:", archetype.display_name());
                for build in builds {
                    println!(
                        "  {:<40} tier {} [{}]",
                        build.name, build.tier, build.id
                    );
                }
            }
            Ok(())
        }
        BuildsCommand::Show { id } => {
            match store.get(&id) {
                Some(build) => println!("{}", serde_json::to_string_pretty(build)?),
                None => println!("No build with id {id}"),
            }
            Ok(())
        }
        BuildsCommand::New { archetype, name } => {
            let mut template = Build::template(String::new(), archetype, 0);
            if let Some(name) = name {
                template.name = name;
            }
            let created = store.create(template);
            store.flush();
            println!("Created build {} ({})", created.name, created.id);
            Ok(())
        }
        BuildsCommand::Delete { id } => {
            if store.delete(&id) {
                store.flush();
                println!("Deleted build {id}");
            } else {
                println!("No build with id {id}");
            }
            Ok(())
        }
        BuildsCommand::Duplicate { id } => match store.duplicate(&id) {
            Some(copy) => {
                store.flush();
                println!("Created build {} ({})", copy.name, copy.id);
                Ok(())
            }
            None => {
                println!("No build with id {id}");
                Ok(())
            }
        },
        BuildsCommand::Export { ids } => {
            let selection = if ids.is_empty() { None } else { Some(ids.as_slice()) };
            println!("{}", store.export(selection));
            Ok(())
        }
        BuildsCommand::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let report = store.import(&text);
            store.flush();
            println!("Imported {} build(s)", report.imported);
            for error in &report.errors {
                eprintln!("skipped: {error}");
            }
            Ok(())
        }
        BuildsCommand::Clear => {
            store.clear();
            store.flush();
            println!("Cleared all builds.");
            Ok(())
        }
    }
}
