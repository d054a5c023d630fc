//! Column names understood by content stores.
//!
//! These follow the platform media-store schema. Filter expressions are free
//! text, but projections and sort rules only ever name these columns.

pub const ID: &str = "_id";
pub const TITLE: &str = "title";
pub const DISPLAY_NAME: &str = "display_name";
pub const DATE_ADDED: &str = "date_added";
pub const MIME_TYPE: &str = "mime_type";
/// Filesystem path of the item's bytes
pub const DATA: &str = "_data";

pub const IS_RINGTONE: &str = "is_ringtone";
pub const IS_NOTIFICATION: &str = "is_notification";
pub const IS_MUSIC: &str = "is_music";
pub const IS_ALARM: &str = "is_alarm";
