//! Index key specifications and index management results.

use std::fmt;

use bson::{Bson, Document};
use mongodb::IndexModel;

use crate::book::{BookField, SortDirection};

/// Ordered key specification for an index, e.g. `{ author: 1, published_year: -1 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    keys: Vec<(BookField, SortDirection)>,
}

impl IndexSpec {
    /// Single-field ascending index.
    pub fn ascending(field: BookField) -> Self {
        Self::new().key(field, SortDirection::Ascending)
    }

    /// Empty specification; add keys with [`IndexSpec::key`].
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Append a key. A field named twice keeps its first position and direction.
    pub fn key(mut self, field: BookField, direction: SortDirection) -> Self {
        if !self.keys.iter().any(|(f, _)| *f == field) {
            self.keys.push((field, direction));
        }
        self
    }

    /// Whether no keys were added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key document sent to `createIndexes`.
    pub fn to_document(&self) -> Document {
        let mut keys = Document::new();
        for (field, direction) in &self.keys {
            keys.insert(field.as_str(), direction.as_i32());
        }
        keys
    }

    /// Keys rendered as relaxed extended JSON, e.g. `{"title":1}`.
    pub fn keys_json(&self) -> String {
        Bson::Document(self.to_document())
            .into_relaxed_extjson()
            .to_string()
    }

    /// The name the server derives for this index (`author_1_published_year_-1`).
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, direction)| format!("{}_{}", field.as_str(), direction.as_i32()))
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl Default for IndexSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&IndexSpec> for IndexModel {
    fn from(spec: &IndexSpec) -> Self {
        IndexModel::builder().keys(spec.to_document()).build()
    }
}

/// An index as reported by `listIndexes`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub keys: Document,
}

impl IndexInfo {
    /// Extract name and keys from a driver index model.
    pub fn from_model(model: IndexModel) -> Self {
        let name = model
            .options
            .as_ref()
            .and_then(|opts| opts.name.clone())
            .unwrap_or_default();
        Self {
            name,
            keys: model.keys,
        }
    }

    /// Keys rendered as relaxed extended JSON, e.g. `{"title":1}`.
    pub fn keys_json(&self) -> String {
        Bson::Document(self.keys.clone())
            .into_relaxed_extjson()
            .to_string()
    }
}

/// Result of [`ensure_index`](crate::facade::BookQueryFacade::ensure_index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The index exists now (freshly built or already identical).
    Created(String),
    /// The server refused because a conflicting definition is already present.
    Conflict { keys: String, reason: String },
}

impl IndexOutcome {
    /// Index name when the call succeeded.
    pub fn name(&self) -> Option<&str> {
        match self {
            IndexOutcome::Created(name) => Some(name),
            IndexOutcome::Conflict { .. } => None,
        }
    }

    /// Whether the call hit a conflicting definition.
    pub fn is_conflict(&self) -> bool {
        matches!(self, IndexOutcome::Conflict { .. })
    }
}

impl fmt::Display for IndexOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexOutcome::Created(name) => write!(f, "{}", name),
            IndexOutcome::Conflict { keys, reason } => {
                write!(f, "index on {} may already exist: {}", keys, reason)
            }
        }
    }
}
