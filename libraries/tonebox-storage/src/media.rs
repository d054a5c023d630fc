//! Audio media queries
//!
//! SQL against the `audio_media` table. Projections are checked against the
//! table's columns; filter expressions go in verbatim with their arguments
//! bound positionally after the volume.

use crate::error::{Result, StorageError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use std::fmt::Write as _;
use tonebox_core::{fields, EntryId, FieldValue, SortDirection, StoreQuery, StoreRow};

/// Columns of `audio_media` a query may project
const COLUMNS: &[&str] = &[
    fields::ID,
    fields::TITLE,
    fields::DISPLAY_NAME,
    fields::MIME_TYPE,
    fields::DATA,
    fields::DATE_ADDED,
    fields::IS_RINGTONE,
    fields::IS_NOTIFICATION,
    fields::IS_MUSIC,
    fields::IS_ALARM,
];

/// SELECT statement for a store query
pub fn select_sql(query: &StoreQuery) -> Result<String> {
    if let Some(unknown) = query.projection.iter().find(|c| !COLUMNS.contains(*c)) {
        return Err(StorageError::UnknownColumn((*unknown).to_string()));
    }

    let columns = if query.projection.is_empty() {
        fields::ID.to_string()
    } else {
        query.projection.join(", ")
    };

    let mut sql = format!("SELECT {} FROM audio_media WHERE volume = ?", columns);
    if let Some(filter) = &query.filter {
        let _ = write!(sql, " AND ({})", filter.expression);
    }
    if let Some(sort) = query.sort {
        let direction = match sort.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let _ = write!(sql, " ORDER BY {} {}, _id ASC", sort.field.column(), direction);
    }
    Ok(sql)
}

/// Run a store query against one volume
pub async fn query(pool: &SqlitePool, query: &StoreQuery) -> Result<Vec<StoreRow>> {
    let sql = select_sql(query)?;

    let mut statement = sqlx::query(&sql).bind(&query.location.name);
    if let Some(filter) = &query.filter {
        for arg in &filter.args {
            statement = statement.bind(arg);
        }
    }

    let rows = statement.fetch_all(pool).await?;
    rows.iter()
        .map(|row| to_store_row(row, &query.projection))
        .collect()
}

/// Filesystem path stored for a row
pub async fn get_path(pool: &SqlitePool, volume: &str, id: EntryId) -> Result<String> {
    let path: Option<Option<String>> =
        sqlx::query_scalar("SELECT _data FROM audio_media WHERE volume = ? AND _id = ?")
            .bind(volume)
            .bind(id)
            .fetch_optional(pool)
            .await?;

    path.flatten()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| StorageError::not_found("audio_media", format!("{}/{}", volume, id)))
}

/// Insert or replace one media row
pub async fn upsert(pool: &SqlitePool, volume: &str, media: &NewMedia) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO audio_media (
            _id, volume, title, display_name, mime_type, _data, date_added,
            is_ringtone, is_notification, is_music, is_alarm
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(media.id)
    .bind(volume)
    .bind(&media.title)
    .bind(&media.display_name)
    .bind(&media.mime_type)
    .bind(&media.data)
    .bind(media.date_added)
    .bind(media.is_ringtone)
    .bind(media.is_notification)
    .bind(media.is_music)
    .bind(media.is_alarm)
    .execute(pool)
    .await?;
    Ok(())
}

/// A media row to insert
#[derive(Debug, Clone, Default)]
pub struct NewMedia {
    pub id: EntryId,
    pub title: Option<String>,
    pub display_name: Option<String>,
    pub mime_type: Option<String>,
    pub data: Option<String>,
    pub date_added: Option<i64>,
    pub is_ringtone: bool,
    pub is_notification: bool,
    pub is_music: bool,
    pub is_alarm: bool,
}

impl NewMedia {
    pub fn new(id: EntryId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }
}

fn to_store_row(row: &SqliteRow, projection: &[&'static str]) -> Result<StoreRow> {
    let mut out = StoreRow::new();
    for (index, column) in projection.iter().enumerate() {
        let value = {
            let raw = row.try_get_raw(index)?;
            if raw.is_null() {
                None
            } else {
                Some(raw.type_info().name().to_string())
            }
        };

        let value = match value.as_deref() {
            None | Some("BLOB") => FieldValue::Null,
            Some("INTEGER") => FieldValue::Integer(row.try_get(index)?),
            Some("REAL") => FieldValue::Real(row.try_get(index)?),
            Some(_) => FieldValue::Text(row.try_get(index)?),
        };
        out.set(*column, value);
    }
    Ok(out)
}
