//! Accessors for reading server responses.

use bson::{Bson, Document};

use crate::error::{MongoError, MongoResult};

/// Extension trait for reading server responses.
///
/// Server replies mix Int32, Int64 and Double for the same counter depending
/// on version and magnitude; the numeric getters accept any of them.
pub trait DocumentExt {
    /// Get an optional string value.
    fn str_opt(&self, key: &str) -> Option<&str>;

    /// Get a nested document.
    fn document(&self, key: &str) -> MongoResult<&Document>;

    /// Get an optional nested document.
    fn document_opt(&self, key: &str) -> Option<&Document>;

    /// Get an integer, accepting any BSON numeric type.
    fn number_i64(&self, key: &str) -> MongoResult<i64>;

    /// Get an optional integer, accepting any BSON numeric type.
    fn number_i64_opt(&self, key: &str) -> Option<i64>;
}

impl DocumentExt for Document {
    fn str_opt(&self, key: &str) -> Option<&str> {
        self.get_str(key).ok()
    }

    fn document(&self, key: &str) -> MongoResult<&Document> {
        self.get_document(key)
            .map_err(|_| MongoError::query(format!("field '{}' is not a document", key)))
    }

    fn document_opt(&self, key: &str) -> Option<&Document> {
        self.get_document(key).ok()
    }

    fn number_i64(&self, key: &str) -> MongoResult<i64> {
        self.number_i64_opt(key)
            .ok_or_else(|| MongoError::query(format!("field '{}' is not a number", key)))
    }

    fn number_i64_opt(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Bson::Int32(v) => Some(i64::from(*v)),
            Bson::Int64(v) => Some(*v),
            Bson::Double(v) => Some(*v as i64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_number_accepts_all_numeric_types() {
        let doc = doc! { "a": 7_i32, "b": 9_i64, "c": 3.0, "d": "x" };
        assert_eq!(doc.number_i64("a").unwrap(), 7);
        assert_eq!(doc.number_i64("b").unwrap(), 9);
        assert_eq!(doc.number_i64("c").unwrap(), 3);
        assert!(doc.number_i64("d").is_err());
        assert!(doc.number_i64("missing").is_err());
    }

    #[test]
    fn test_document_accessors() {
        let doc = doc! { "stats": { "stage": "COLLSCAN" }, "name": "books" };
        assert_eq!(doc.str_opt("name"), Some("books"));
        assert!(doc.document("stats").is_ok());
        assert!(doc.document("name").is_err());
        assert!(doc.document_opt("missing").is_none());
    }
}
