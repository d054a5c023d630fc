/// Tonebox - audio catalog browser
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tonebox_catalog::{CatalogConfig, CategoryRegistry};
use tonebox_core::{CatalogEntry, EntryId, SessionState, ToneboxError};
use tonebox_facade::CatalogFacade;
use tonebox_playback::{PlaybackEvent, SourceResolver};
use tonebox_storage::{FsSourceOpener, SqliteContentStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod sink;

use sink::LoggingSink;

#[derive(Parser)]
#[command(name = "tonebox")]
#[command(about = "Browse and audition the audio catalog", long_about = None)]
struct Cli {
    /// Catalog configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database URL
    #[arg(
        long,
        env = "TONEBOX_DATABASE",
        default_value = "sqlite://tonebox.db",
        global = true
    )]
    database: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured categories
    Categories,
    /// List the entries of a category
    List {
        /// Category name
        category: String,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how an entry's reference resolves
    Resolve {
        /// Category name
        category: String,
        /// Entry id
        id: EntryId,
    },
    /// Play an entry through the dry-run sink
    Play {
        /// Category name
        category: String,
        /// Entry id
        id: EntryId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON listings stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tonebox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CatalogConfig::load(cli.config.as_deref())
        .context("Failed to load catalog configuration")?;
    let registry = CategoryRegistry::from_config(&config)?;

    if let Commands::Categories = cli.command {
        for definition in registry.definitions() {
            let filter = definition
                .filter
                .as_ref()
                .map_or_else(|| "(all rows)".to_string(), ToString::to_string);
            println!(
                "{:<16} {:<10} {}",
                definition.name, definition.location.name, filter
            );
        }
        return Ok(());
    }

    let pool = tonebox_storage::create_pool(&cli.database).await?;
    tonebox_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let store = Arc::new(SqliteContentStore::new(pool, config.locations.clone()));
    let opener = Arc::new(FsSourceOpener::with_store(store.clone()));
    let resolver = SourceResolver::new(store.clone(), opener.clone());
    let facade = CatalogFacade::new(registry, store, opener, Box::new(LoggingSink::default()));

    match cli.command {
        Commands::Categories => {}
        Commands::List { category, json } => {
            let entries = list(&facade, &category).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }
        Commands::Resolve { category, id } => {
            let entry = find_entry(&facade, &category, id).await?;
            let source = resolver
                .resolve(&entry)
                .await
                .map_err(|e| user_error(ToneboxError::from(e)))?;
            println!("strategy:   {}", source.strategy());
            println!("descriptor: {:?}", source.descriptor());
            source.close()?;
        }
        Commands::Play { category, id } => {
            let entry = find_entry(&facade, &category, id).await?;
            play(&facade, &entry).await?;
        }
    }

    Ok(())
}

async fn list(facade: &CatalogFacade, category: &str) -> anyhow::Result<Vec<CatalogEntry>> {
    facade
        .list_entries(category)
        .await
        .map_err(|e| user_error(ToneboxError::from(e)))
}

async fn find_entry(
    facade: &CatalogFacade,
    category: &str,
    id: EntryId,
) -> anyhow::Result<CatalogEntry> {
    list(facade, category)
        .await?
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| anyhow!("{} has no entry {}", category, id))
}

async fn play(facade: &CatalogFacade, entry: &CatalogEntry) -> anyhow::Result<()> {
    let mut events = facade.subscribe();
    let session = facade
        .play(entry)
        .await
        .map_err(|e| user_error(ToneboxError::from(e)))?;

    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(PlaybackEvent::StateChanged {
                    session: s,
                    state: SessionState::Playing,
                }) if s == session => return Ok(()),
                Ok(PlaybackEvent::Error { session: s, error }) if s == session => {
                    return Err(user_error(ToneboxError::from(error)))
                }
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(e) => return Err(anyhow!("event stream ended: {}", e)),
            }
        }
    })
    .await
    .context("Timed out waiting for the sink")?;

    if outcome.is_ok() {
        println!("playing {} ({})", entry.display_name, session);
    }
    facade.stop().await;
    outcome
}

fn print_entries(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("(no entries)");
        return;
    }
    for entry in entries {
        let added = entry
            .date_added
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("{:>6}  {:<40} {}", entry.id, entry.display_name, added);
    }
}

fn user_error(err: ToneboxError) -> anyhow::Error {
    anyhow!("{}: {}", err.user_message(), err)
}
