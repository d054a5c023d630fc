/// Storage-specific errors
use thiserror::Error;
use tonebox_core::StoreError;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// A projected column is not part of the media table
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The reference was not minted by any known location
    #[error("Reference belongs to no known location: {0}")]
    ForeignReference(String),

    /// Row not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::UnknownColumn(_) => StoreError::MalformedFilter(err.to_string()),
            StorageError::ForeignReference(_) | StorageError::NotFound { .. } => {
                StoreError::NotFound(err.to_string())
            }
            StorageError::Database(sqlx::Error::Database(db)) if rejects_statement(&**db) => {
                StoreError::MalformedFilter(err.to_string())
            }
            StorageError::Database(sqlx::Error::RowNotFound) => {
                StoreError::NotFound(err.to_string())
            }
            StorageError::Database(_) | StorageError::Migration(_) => {
                StoreError::Unreachable(err.to_string())
            }
        }
    }
}

/// Primary `SQLite` result code for a generic statement error
const SQLITE_ERROR: i64 = 1;

/// Whether the database refused the statement text itself
///
/// Only a plain `SQLITE_ERROR` about the statement (syntax, unknown column)
/// counts. Busy, locked, corrupt, unopenable or missing tables mean the store
/// itself is not usable.
fn rejects_statement(db: &dyn sqlx::error::DatabaseError) -> bool {
    let primary = db
        .code()
        .and_then(|code| code.parse::<i64>().ok())
        .map(|code| code & 0xff);
    primary == Some(SQLITE_ERROR) && !db.message().starts_with("no such table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePool;

    async fn database_error(sql: &str) -> StoreError {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let err = sqlx::query(sql).fetch_all(&pool).await.err().unwrap();
        assert!(matches!(err, sqlx::Error::Database(_)));
        StoreError::from(StorageError::Database(err))
    }

    #[test]
    fn maps_onto_store_taxonomy() {
        assert!(matches!(
            StoreError::from(StorageError::UnknownColumn("bogus".into())),
            StoreError::MalformedFilter(_)
        ));
        assert!(matches!(
            StoreError::from(StorageError::not_found("audio_media", "7")),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            StoreError::from(StorageError::Database(sqlx::Error::PoolTimedOut)),
            StoreError::Unreachable(_)
        ));
        assert!(matches!(
            StoreError::from(StorageError::Database(sqlx::Error::RowNotFound)),
            StoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn statement_errors_are_malformed_filters() {
        assert!(matches!(
            database_error("SELECT name FROM sqlite_master WHERE").await,
            StoreError::MalformedFilter(_)
        ));
        assert!(matches!(
            database_error("SELECT no_such_column FROM sqlite_master").await,
            StoreError::MalformedFilter(_)
        ));
    }

    #[tokio::test]
    async fn missing_table_is_unreachable() {
        assert!(matches!(
            database_error("SELECT _id FROM audio_media").await,
            StoreError::Unreachable(_)
        ));
    }
}
