//! Filter document construction for book queries.

use bson::{Bson, Document, doc, oid::ObjectId};

use crate::book::BookField;

/// Builder for MongoDB filter documents.
///
/// Fields are named through [`BookField`], so only attributes a book
/// actually has can be filtered on.
///
/// # Example
///
/// ```rust,ignore
/// use bookstore_mongodb::{BookField, FilterBuilder};
///
/// let filter = FilterBuilder::new()
///     .eq(BookField::InStock, true)
///     .gt(BookField::PublishedYear, 2010)
///     .build();
///
/// // Produces: { "in_stock": true, "published_year": { "$gt": 2010 } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    doc: Document,
}

impl FilterBuilder {
    /// Create a new empty filter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter builder from an existing document.
    pub fn from_doc(doc: Document) -> Self {
        Self { doc }
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: BookField, value: impl Into<Bson>) -> Self {
        self.doc.insert(field.as_str(), value.into());
        self
    }

    /// Add a not-equal condition.
    pub fn ne(self, field: BookField, value: impl Into<Bson>) -> Self {
        self.operator(field, "$ne", value.into())
    }

    /// Add a greater-than condition.
    pub fn gt(self, field: BookField, value: impl Into<Bson>) -> Self {
        self.operator(field, "$gt", value.into())
    }

    /// Add a greater-than-or-equal condition.
    pub fn gte(self, field: BookField, value: impl Into<Bson>) -> Self {
        self.operator(field, "$gte", value.into())
    }

    /// Add a less-than condition.
    pub fn lt(self, field: BookField, value: impl Into<Bson>) -> Self {
        self.operator(field, "$lt", value.into())
    }

    /// Add a less-than-or-equal condition.
    pub fn lte(self, field: BookField, value: impl Into<Bson>) -> Self {
        self.operator(field, "$lte", value.into())
    }

    /// Add an "in" condition (value in array).
    pub fn in_array(self, field: BookField, values: Vec<impl Into<Bson>>) -> Self {
        let bson_values: Vec<Bson> = values.into_iter().map(Into::into).collect();
        self.operator(field, "$in", Bson::Array(bson_values))
    }

    /// Add an exists condition.
    pub fn exists(self, field: BookField, exists: bool) -> Self {
        self.operator(field, "$exists", Bson::Boolean(exists))
    }

    /// Add an ObjectId filter on the `_id` field.
    pub fn by_id(mut self, id: ObjectId) -> Self {
        self.doc.insert("_id", id);
        self
    }

    /// Combine with AND ($and).
    pub fn and(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$and", conditions);
        self
    }

    /// Combine with OR ($or).
    pub fn or(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$or", conditions);
        self
    }

    /// Merge another filter into this one.
    pub fn merge(mut self, other: Document) -> Self {
        for (k, v) in other {
            self.doc.insert(k, v);
        }
        self
    }

    /// Build the filter document.
    pub fn build(self) -> Document {
        self.doc
    }

    /// Check if the filter is empty.
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    // Operators on the same field accumulate into one sub-document, so
    // `gte(..).lt(..)` yields a range instead of the second overwriting the first.
    fn operator(mut self, field: BookField, op: &str, value: Bson) -> Self {
        let key = field.as_str();
        if let Some(Bson::Document(existing)) = self.doc.get_mut(key) {
            if existing.keys().all(|k| k.starts_with('$')) {
                existing.insert(op, value);
                return self;
            }
        }
        self.doc.insert(key, doc! { op: value });
        self
    }
}

/// Create an empty filter (matches all documents).
pub fn all() -> Document {
    doc! {}
}

/// Books whose genre equals `genre`.
pub fn by_genre(genre: &str) -> Document {
    FilterBuilder::new().eq(BookField::Genre, genre).build()
}

/// Books written by `author`.
pub fn by_author(author: &str) -> Document {
    FilterBuilder::new().eq(BookField::Author, author).build()
}

/// Books titled exactly `title`.
pub fn by_title(title: &str) -> Document {
    FilterBuilder::new().eq(BookField::Title, title).build()
}

/// Books published strictly after `year`.
pub fn published_after(year: i32) -> Document {
    FilterBuilder::new().gt(BookField::PublishedYear, year).build()
}

/// Books in stock and published strictly after `year`.
pub fn in_stock_after(year: i32) -> Document {
    FilterBuilder::new()
        .eq(BookField::InStock, true)
        .gt(BookField::PublishedYear, year)
        .build()
}

/// Books by `author` published in or after `year`.
pub fn by_author_since(author: &str, year: i32) -> Document {
    FilterBuilder::new()
        .eq(BookField::Author, author)
        .gte(BookField::PublishedYear, year)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_builder_eq() {
        let filter = FilterBuilder::new()
            .eq(BookField::Author, "George Orwell")
            .eq(BookField::Pages, 328)
            .build();

        assert_eq!(filter.get_str("author").unwrap(), "George Orwell");
        assert_eq!(filter.get_i32("pages").unwrap(), 328);
    }

    #[test]
    fn test_filter_builder_range_accumulates() {
        let filter = FilterBuilder::new()
            .gte(BookField::PublishedYear, 1950)
            .lt(BookField::PublishedYear, 1960)
            .build();

        assert_eq!(
            filter,
            doc! { "published_year": { "$gte": 1950, "$lt": 1960 } }
        );
    }

    #[test]
    fn test_filter_builder_operator_replaces_equality() {
        let filter = FilterBuilder::new()
            .eq(BookField::Price, 9.99)
            .gt(BookField::Price, 5.0)
            .build();

        assert_eq!(filter, doc! { "price": { "$gt": 5.0 } });
    }

    #[test]
    fn test_filter_builder_in_array() {
        let filter = FilterBuilder::new()
            .in_array(BookField::Genre, vec!["Fiction", "Fantasy"])
            .build();

        let genre = filter.get_document("genre").unwrap();
        assert!(genre.contains_key("$in"));
    }

    #[test]
    fn test_filter_builder_or() {
        let filter = FilterBuilder::new()
            .or(vec![by_genre("Fiction"), by_author("J.R.R. Tolkien")])
            .build();

        assert!(filter.contains_key("$or"));
    }

    #[test]
    fn test_filter_builder_by_id() {
        let oid = ObjectId::new();
        let filter = FilterBuilder::new().by_id(oid).build();
        assert_eq!(filter.get_object_id("_id").unwrap(), oid);
    }

    #[test]
    fn test_published_after() {
        assert_eq!(
            published_after(1950),
            doc! { "published_year": { "$gt": 1950 } }
        );
    }

    #[test]
    fn test_in_stock_after() {
        assert_eq!(
            in_stock_after(2010),
            doc! { "in_stock": true, "published_year": { "$gt": 2010 } }
        );
    }

    #[test]
    fn test_by_author_since() {
        assert_eq!(
            by_author_since("J.R.R. Tolkien", 1950),
            doc! { "author": "J.R.R. Tolkien", "published_year": { "$gte": 1950 } }
        );
    }

    #[test]
    fn test_all_filter() {
        assert!(all().is_empty());
        assert!(FilterBuilder::new().is_empty());
    }
}
