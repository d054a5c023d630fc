//! Filter-construction policies
//!
//! Categories describe their filter declaratively ([`FilterSpec`]); the
//! [`FilterPolicy`] picked by configuration turns that into the store predicate.
//! Two choices are left to configuration:
//! - how an extension category matches rows (MIME type or file-name suffix)
//! - what an absent filter means (every row, or no row at all)

use serde::{Deserialize, Serialize};
use tonebox_core::{fields, FilterPredicate};
use tracing::warn;

/// Always-false predicate used by [`MissingFilter::NoRows`]
pub const ALWAYS_FALSE: &str = "0 != 0";

/// Declarative filter of a configured category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSpec {
    /// Rows whose boolean flag column is set
    Flag { flag: String },

    /// Audio files with this extension
    Extension { extension: String },

    /// Raw store expression, passed through verbatim
    Expression {
        expression: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

/// How extension categories match rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionMatch {
    /// `mime_type = ?` with the extension's MIME type
    MimeType,
    /// `display_name LIKE '%.<ext>'`
    #[default]
    FileSuffix,
}

/// What an absent filter means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilter {
    /// No predicate at all: every row at the location
    #[default]
    AllRows,
    /// The always-false predicate: nothing
    NoRows,
}

/// Filter-construction policy, picked by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPolicy {
    #[serde(default)]
    pub extension_match: ExtensionMatch,
    #[serde(default)]
    pub missing: MissingFilter,
}

impl FilterPolicy {
    /// Build the store predicate for a category's declared filter
    pub fn build(&self, spec: Option<&FilterSpec>) -> Option<FilterPredicate> {
        match spec {
            None => missing_predicate(self.missing),
            Some(FilterSpec::Flag { flag }) => Some(flag_predicate(flag)),
            Some(FilterSpec::Extension { extension }) => {
                Some(extension_predicate(self.extension_match, extension))
            }
            Some(FilterSpec::Expression { expression, args }) => Some(FilterPredicate {
                expression: expression.clone(),
                args: args.clone(),
            }),
        }
    }
}

/// `<column> != 0`
pub fn flag_predicate(column: &str) -> FilterPredicate {
    FilterPredicate::new(format!("{column} != ?")).with_arg("0")
}

/// Predicate matching audio files with `extension`
///
/// With [`ExtensionMatch::MimeType`], an extension without a known MIME type
/// falls back to suffix matching.
pub fn extension_predicate(policy: ExtensionMatch, extension: &str) -> FilterPredicate {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();

    if policy == ExtensionMatch::MimeType {
        if let Some(mime) = mime_guess::from_ext(&extension).first() {
            return FilterPredicate::new(format!("{} = ?", fields::MIME_TYPE))
                .with_arg(mime.essence_str());
        }
        warn!(
            "No MIME type known for extension {:?}, matching by file suffix",
            extension
        );
    }

    FilterPredicate::new(format!("{} LIKE ?", fields::DISPLAY_NAME))
        .with_arg(format!("%.{extension}"))
}

/// Predicate used when a category declares no filter
pub fn missing_predicate(policy: MissingFilter) -> Option<FilterPredicate> {
    match policy {
        MissingFilter::AllRows => None,
        MissingFilter::NoRows => Some(FilterPredicate::new(ALWAYS_FALSE)),
    }
}
