mod category;
mod entry;
mod session;
mod source;
mod store;

pub use category::{
    CategoryDefinition, FilterPredicate, SortDirection, SortField, SortRule, StoreLocation,
};
pub use entry::{CatalogEntry, ContentRef, EntryId};
pub use session::{SessionId, SessionState};
pub use source::{ResolvedSource, SourceDescriptor, StrategyKind};
pub use store::{FieldValue, StoreQuery, StoreRow};
