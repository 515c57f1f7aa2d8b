//! The `Book` document model and the field names used to address it.

use std::fmt;

use bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A book document in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, absent until inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
    pub pages: i32,
    pub publisher: String,
}

impl Book {
    /// Create a book without an identifier.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        published_year: i32,
        price: f64,
        in_stock: bool,
        pages: i32,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            published_year,
            price,
            in_stock,
            pages,
            publisher: publisher.into(),
        }
    }
}

/// A book returned by a projected query; only the requested fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// An addressable attribute of a [`Book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Author,
    Genre,
    PublishedYear,
    Price,
    InStock,
    Pages,
    Publisher,
}

impl BookField {
    /// Every field, in document order.
    pub const ALL: [BookField; 8] = [
        BookField::Title,
        BookField::Author,
        BookField::Genre,
        BookField::PublishedYear,
        BookField::Price,
        BookField::InStock,
        BookField::Pages,
        BookField::Publisher,
    ];

    /// The stored field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Genre => "genre",
            BookField::PublishedYear => "published_year",
            BookField::Price => "price",
            BookField::InStock => "in_stock",
            BookField::Pages => "pages",
            BookField::Publisher => "publisher",
        }
    }

    /// Look a field up by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Field path as used inside aggregation expressions (`$price`).
    pub fn path(&self) -> String {
        format!("${}", self.as_str())
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort or index key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The numeric form MongoDB expects (1 / -1).
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Build a projection document that keeps `fields` and drops `_id`.
pub fn projection(fields: &[BookField]) -> Document {
    let mut projection = Document::new();
    for field in fields {
        projection.insert(field.as_str(), 1);
    }
    projection.insert("_id", 0);
    projection
}

/// Build a single-key sort document.
pub fn sort_by(field: BookField, direction: SortDirection) -> Document {
    doc! { field.as_str(): direction.as_i32() }
}
