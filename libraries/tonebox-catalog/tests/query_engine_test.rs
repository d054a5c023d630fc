//! Integration tests for the catalog query engine
//!
//! The content store is a hand-written fake that records every query and sorts
//! its canned rows the way a real store would.

use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tonebox_catalog::{CatalogConfig, CatalogQueryEngine, CategoryRegistry};
use tonebox_core::{
    fields, CategoryDefinition, ContentRef, ContentStore, FilterPredicate, QueryError,
    SortDirection, SortField, SortRule, StoreError, StoreLocation, StoreQuery, StoreRow,
};

// ===== Test Helpers =====

#[derive(Default)]
struct FakeStore {
    rows: HashMap<String, Vec<StoreRow>>,
    failure: Option<StoreError>,
    queries: Mutex<Vec<StoreQuery>>,
}

impl FakeStore {
    fn with_rows(mut self, location: &str, rows: Vec<StoreRow>) -> Self {
        self.rows.insert(location.to_string(), rows);
        self
    }

    fn failing(error: StoreError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn recorded(&self) -> Vec<StoreQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<StoreRow>, StoreError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let mut rows = self
            .rows
            .get(&query.location.name)
            .cloned()
            .unwrap_or_default();

        if let Some(sort) = query.sort {
            let column = sort.field.column();
            rows.sort_by(|a, b| match sort.field {
                SortField::Id | SortField::DateAdded => a.opt_i64(column).cmp(&b.opt_i64(column)),
                _ => a.opt_str(column).cmp(&b.opt_str(column)),
            });
            if sort.direction == SortDirection::Descending {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    async fn resolve_path(&self, reference: &ContentRef) -> Result<PathBuf, StoreError> {
        Err(StoreError::NotFound(reference.to_string()))
    }
}

fn row(id: i64, name: &str) -> StoreRow {
    StoreRow::new()
        .with(fields::ID, id)
        .with(fields::DISPLAY_NAME, name)
        .with(fields::TITLE, name.trim_end_matches(".ogg"))
}

fn internal() -> StoreLocation {
    StoreLocation::new("internal", "content://media/internal/audio/media")
}

fn external() -> StoreLocation {
    StoreLocation::new("external", "content://media/external/audio/media")
}

// ===== Tests =====

#[tokio::test]
async fn test_entries_follow_sort_rule() {
    let store = Arc::new(FakeStore::default().with_rows(
        "internal",
        vec![row(5, "Chime.ogg"), row(2, "Bell.ogg"), row(7, "Alarm.ogg")],
    ));
    let engine = CatalogQueryEngine::new(store.clone());

    let ascending = engine
        .query(&CategoryDefinition::new("All", internal()))
        .await
        .unwrap();
    let names: Vec<_> = ascending.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["Alarm.ogg", "Bell.ogg", "Chime.ogg"]);

    let descending = engine
        .query(
            &CategoryDefinition::new("All", internal())
                .with_sort(SortRule::descending(SortField::Id)),
        )
        .await
        .unwrap();
    let ids: Vec<_> = descending.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![7, 5, 2]);
}

#[tokio::test]
async fn test_listing_is_idempotent() {
    let store = Arc::new(
        FakeStore::default().with_rows("internal", vec![row(2, "Bell.ogg"), row(5, "Chime.ogg")]),
    );
    let engine = CatalogQueryEngine::new(store);
    let definition = CategoryDefinition::new("Ringtones", internal());

    let first = engine.query(&definition).await.unwrap();
    let second = engine.query(&definition).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_filter_is_passed_verbatim() {
    let store = Arc::new(FakeStore::default());
    let engine = CatalogQueryEngine::new(store.clone());
    let predicate = FilterPredicate::new("is_ringtone != ?").with_arg("0");

    engine
        .query(&CategoryDefinition::new("Ringtones", internal()).with_filter(predicate.clone()))
        .await
        .unwrap();
    engine
        .query(&CategoryDefinition::new("Everything", internal()))
        .await
        .unwrap();

    let recorded = store.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].filter, Some(predicate));
    assert_eq!(recorded[1].filter, None);
    assert_eq!(recorded[1].sort, Some(SortRule::default()));
}

#[tokio::test]
async fn test_reference_follows_queried_location() {
    // Same row id in both locations
    let store = Arc::new(
        FakeStore::default()
            .with_rows("internal", vec![row(12, "Bell.ogg")])
            .with_rows("external", vec![row(12, "Song.mp3")]),
    );
    let engine = CatalogQueryEngine::new(store);

    let internal_entries = engine
        .query(&CategoryDefinition::new("Ringtones", internal()))
        .await
        .unwrap();
    let external_entries = engine
        .query(&CategoryDefinition::new("Musics", external()))
        .await
        .unwrap();

    assert_eq!(
        internal_entries[0].content_ref.as_str(),
        "content://media/internal/audio/media/12"
    );
    assert_eq!(
        external_entries[0].content_ref.as_str(),
        "content://media/external/audio/media/12"
    );
    assert_ne!(internal_entries[0].content_ref, external_entries[0].content_ref);
    assert_eq!(internal_entries[0].location, "internal");
}

#[tokio::test]
async fn test_rows_missing_required_fields_are_skipped_and_counted() {
    let store = Arc::new(FakeStore::default().with_rows(
        "internal",
        vec![
            row(1, "Bell.ogg"),
            StoreRow::new().with(fields::DISPLAY_NAME, "NoId.ogg"),
            StoreRow::new().with(fields::ID, 3_i64),
            StoreRow::new()
                .with(fields::ID, 4_i64)
                .with(fields::DISPLAY_NAME, None::<String>),
            row(5, "Chime.ogg"),
        ],
    ));
    let engine = CatalogQueryEngine::new(store);

    let entries = engine
        .query(&CategoryDefinition::new("Ringtones", internal()))
        .await
        .unwrap();

    assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 5]);
    let diagnostics = engine.diagnostics();
    assert_eq!(diagnostics.queries, 1);
    assert_eq!(diagnostics.rows_seen, 5);
    assert_eq!(diagnostics.rows_skipped, 3);
}

#[tokio::test]
async fn test_empty_location_is_not_an_error() {
    let engine = CatalogQueryEngine::new(Arc::new(FakeStore::default()));
    let entries = engine
        .query(&CategoryDefinition::new("Musics", external()))
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_store_errors_map_to_query_errors() {
    let definition = CategoryDefinition::new("Ringtones", internal());

    let unreachable =
        CatalogQueryEngine::new(Arc::new(FakeStore::failing(StoreError::Unreachable(
            "connection refused".into(),
        ))));
    assert!(matches!(
        unreachable.query(&definition).await,
        Err(QueryError::StoreUnavailable(_))
    ));

    let malformed = CatalogQueryEngine::new(Arc::new(FakeStore::failing(
        StoreError::MalformedFilter("near \"!=\": syntax error".into()),
    )));
    assert!(matches!(
        malformed.query(&definition).await,
        Err(QueryError::InvalidDefinition(_))
    ));
    assert_eq!(malformed.diagnostics().queries, 1);
}

#[tokio::test]
async fn test_builtin_categories_query_their_own_locations() {
    let registry = CategoryRegistry::from_config(&CatalogConfig::default()).unwrap();
    let store = Arc::new(FakeStore::default());
    let engine = CatalogQueryEngine::new(store.clone());

    for definition in registry.definitions() {
        engine.query(definition).await.unwrap();
    }

    let locations: Vec<_> = store
        .recorded()
        .into_iter()
        .map(|q| q.location.name)
        .collect();
    assert_eq!(locations, vec!["internal", "internal", "external", "external"]);
}

// ===== Property Tests =====

fn arb_row() -> impl Strategy<Value = StoreRow> {
    (
        proptest::option::of(0i64..10_000),
        proptest::option::of("[A-Za-z ]{0,12}"),
    )
        .prop_map(|(id, name)| {
            let mut row = StoreRow::new();
            if let Some(id) = id {
                row.set(fields::ID, id);
            }
            if let Some(name) = name {
                row.set(fields::DISPLAY_NAME, name);
            }
            row
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every listed entry has a non-empty name, and listed + skipped = rows returned
    #[test]
    fn prop_skipped_rows_are_accounted_for(rows in proptest::collection::vec(arb_row(), 0..40)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let total = rows.len() as u64;
        let store = FakeStore::default().with_rows("internal", rows);
        let engine = CatalogQueryEngine::new(Arc::new(store));

        let entries = runtime
            .block_on(engine.query(&CategoryDefinition::new("All", internal())))
            .unwrap();

        prop_assert!(entries.iter().all(|e| !e.display_name.is_empty()));
        let diagnostics = engine.diagnostics();
        prop_assert_eq!(entries.len() as u64 + diagnostics.rows_skipped, total);
        prop_assert_eq!(diagnostics.rows_seen, total);

        let names: Vec<_> = entries.iter().map(|e| e.display_name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(names, sorted);
    }
}
