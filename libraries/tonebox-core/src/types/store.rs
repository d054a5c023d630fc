//! Store query requests and the rows they yield

use super::category::{FilterPredicate, SortRule, StoreLocation};
use crate::error::FieldError;
use std::collections::BTreeMap;

/// A single query against one store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreQuery {
    pub location: StoreLocation,
    /// Columns to fetch
    pub projection: Vec<&'static str>,
    pub filter: Option<FilterPredicate>,
    pub sort: Option<SortRule>,
}

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One row from a store cursor, with named-field access
///
/// A `NULL` column reads the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRow {
    fields: BTreeMap<String, FieldValue>,
}

impl StoreRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for adapters and tests
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    fn present(&self, field: &str) -> Result<&FieldValue, FieldError> {
        match self.fields.get(field) {
            None | Some(FieldValue::Null) => Err(FieldError::NotFound(field.to_string())),
            Some(value) => Ok(value),
        }
    }

    pub fn get_i64(&self, field: &str) -> Result<i64, FieldError> {
        match self.present(field)? {
            FieldValue::Integer(v) => Ok(*v),
            FieldValue::Text(s) => s.trim().parse().map_err(|_| FieldError::WrongType {
                field: field.to_string(),
                expected: "integer",
            }),
            _ => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "integer",
            }),
        }
    }

    pub fn get_str(&self, field: &str) -> Result<&str, FieldError> {
        match self.present(field)? {
            FieldValue::Text(s) => Ok(s),
            _ => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "text",
            }),
        }
    }

    /// Like [`get_str`](Self::get_str), but `None` when absent or null
    pub fn opt_str(&self, field: &str) -> Option<&str> {
        self.get_str(field).ok()
    }

    pub fn opt_i64(&self, field: &str) -> Option<i64> {
        self.get_i64(field).ok()
    }
}
