//! Tonebox Storage
//!
//! `SQLite` content store and filesystem source opener: the reference
//! implementations of the store and opener capabilities from `tonebox-core`.
//!
//! # Architecture
//!
//! - **Volumes**: rows live in one `audio_media` table, partitioned by the
//!   `volume` column (one volume per store location)
//! - **Vertical Slicing**: `media` owns its SQL; `SqliteContentStore` only
//!   adapts it to the `ContentStore` trait
//!
//! # Example
//!
//! ```rust,no_run
//! use tonebox_core::StoreLocation;
//! use tonebox_storage::{create_pool, run_migrations, SqliteContentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tonebox.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteContentStore::new(
//!     pool,
//!     vec![StoreLocation::new("internal", "content://media/internal/audio/media")],
//! );
//! # Ok(())
//! # }
//! ```

mod error;
mod opener;
mod store;

// Vertical slices
pub mod media;

pub use error::{Result, StorageError};
pub use opener::FsSourceOpener;
pub use store::SqliteContentStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tonebox.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
