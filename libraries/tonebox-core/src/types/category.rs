//! Category definitions and the store locations they point at

use super::entry::{ContentRef, EntryId};
use crate::fields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where rows live in the content store, plus how items there are addressed
///
/// Locations do not share an addressing convention: an entry found under
/// `internal` must be referenced through the internal item base, never the
/// external one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreLocation {
    /// Store-side partition name (e.g. `internal`, `external`)
    pub name: String,

    /// Canonical item-addressing base; items are `<item_base>/<id>`
    pub item_base: String,

    /// Whether rows here record an added timestamp
    #[serde(default = "default_tracks_date_added")]
    pub tracks_date_added: bool,
}

fn default_tracks_date_added() -> bool {
    true
}

impl StoreLocation {
    pub fn new(name: impl Into<String>, item_base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_base: item_base.into(),
            tracks_date_added: true,
        }
    }

    /// Mark the location as not tracking added timestamps
    pub fn without_date_added(mut self) -> Self {
        self.tracks_date_added = false;
        self
    }

    /// Content reference of row `id` under this location's convention
    pub fn item_reference(&self, id: EntryId) -> ContentRef {
        ContentRef::new(format!("{}/{}", self.item_base.trim_end_matches('/'), id))
    }

    /// Inverse of [`item_reference`](Self::item_reference)
    ///
    /// Returns `None` when the reference was not minted by this location.
    pub fn parse_item_reference(&self, reference: &ContentRef) -> Option<EntryId> {
        let base = self.item_base.trim_end_matches('/');
        reference
            .as_str()
            .strip_prefix(base)?
            .strip_prefix('/')?
            .parse()
            .ok()
    }
}

/// Boolean expression over row fields, in the store's own grammar
///
/// The expression is handed to the store verbatim; `?` placeholders bind to
/// `args` in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub expression: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FilterPredicate {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.expression)
        } else {
            write!(f, "{} {:?}", self.expression, self.args)
        }
    }
}

/// Sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    DisplayName,
    Title,
    DateAdded,
    Id,
}

impl SortField {
    /// Store column backing this field
    pub fn column(self) -> &'static str {
        match self {
            SortField::DisplayName => fields::DISPLAY_NAME,
            SortField::Title => fields::TITLE,
            SortField::DateAdded => fields::DATE_ADDED,
            SortField::Id => fields::ID,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

/// Field + direction; defaults to display name ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortRule {
    pub field: SortField,
    #[serde(default = "default_direction")]
    pub direction: SortDirection,
}

fn default_direction() -> SortDirection {
    SortDirection::Ascending
}

impl Default for SortRule {
    fn default() -> Self {
        Self {
            field: SortField::DisplayName,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortRule {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// A named, predefined audio grouping
///
/// Built once at startup from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Unique, stable key
    pub name: String,
    pub location: StoreLocation,
    /// `None` means every row at the location
    pub filter: Option<FilterPredicate>,
    pub sort: SortRule,
}

impl CategoryDefinition {
    pub fn new(name: impl Into<String>, location: StoreLocation) -> Self {
        Self {
            name: name.into(),
            location,
            filter: None,
            sort: SortRule::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterPredicate) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortRule) -> Self {
        self.sort = sort;
        self
    }
}
