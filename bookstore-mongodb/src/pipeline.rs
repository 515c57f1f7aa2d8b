//! Aggregation pipeline construction.
//!
//! The pipelines the facade runs are built here as plain documents so their
//! shape can be checked without a server. Execution is left to
//! [`BookQueryFacade`](crate::facade::BookQueryFacade).
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_mongodb::pipeline::{PipelineBuilder, accumulators};
//! use bson::doc;
//!
//! let pipeline = PipelineBuilder::new()
//!     .match_stage(doc! { "in_stock": true })
//!     .group_stage("$genre", doc! { "count": accumulators::count() })
//!     .sort_stage(doc! { "count": -1 })
//!     .build();
//! ```

use bson::{Bson, Document, doc};

use crate::book::BookField;

/// Fluent builder for an aggregation pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    stages: Vec<Document>,
}

impl PipelineBuilder {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw stage.
    pub fn add_stage(mut self, stage: Document) -> Self {
        self.stages.push(stage);
        self
    }

    /// Add a $match stage.
    pub fn match_stage(self, filter: Document) -> Self {
        self.add_stage(stages::match_stage(filter))
    }

    /// Add an $addFields stage.
    pub fn add_fields_stage(self, fields: Document) -> Self {
        self.add_stage(stages::add_fields(fields))
    }

    /// Add a $group stage.
    pub fn group_stage(self, id: impl Into<Bson>, accumulators: Document) -> Self {
        self.add_stage(stages::group(id, accumulators))
    }

    /// Add a $sort stage.
    pub fn sort_stage(self, sort: Document) -> Self {
        self.add_stage(stages::sort(sort))
    }

    /// Add a $limit stage.
    pub fn limit_stage(self, limit: i64) -> Self {
        self.add_stage(stages::limit(limit))
    }

    /// Finish the pipeline.
    pub fn build(self) -> Vec<Document> {
        self.stages
    }
}

/// Helper functions for common aggregation stages.
pub mod stages {
    use bson::{Bson, Document, doc};

    /// Create a $match stage.
    pub fn match_stage(filter: Document) -> Document {
        doc! { "$match": filter }
    }

    /// Create a $group stage.
    pub fn group(id: impl Into<Bson>, accumulators: Document) -> Document {
        let mut group_doc = doc! { "_id": id.into() };
        group_doc.extend(accumulators);
        doc! { "$group": group_doc }
    }

    /// Create a $sort stage.
    pub fn sort(fields: Document) -> Document {
        doc! { "$sort": fields }
    }

    /// Create a $limit stage.
    pub fn limit(n: i64) -> Document {
        doc! { "$limit": n }
    }

    /// Create an $addFields stage.
    pub fn add_fields(fields: Document) -> Document {
        doc! { "$addFields": fields }
    }
}

/// Aggregation accumulators for use in $group stages.
pub mod accumulators {
    use bson::{Bson, doc};

    /// Sum accumulator.
    pub fn sum(expr: impl Into<Bson>) -> Bson {
        Bson::Document(doc! { "$sum": expr.into() })
    }

    /// Average accumulator.
    pub fn avg(expr: impl Into<Bson>) -> Bson {
        Bson::Document(doc! { "$avg": expr.into() })
    }

    /// Minimum accumulator.
    pub fn min(expr: impl Into<Bson>) -> Bson {
        Bson::Document(doc! { "$min": expr.into() })
    }

    /// Maximum accumulator.
    pub fn max(expr: impl Into<Bson>) -> Bson {
        Bson::Document(doc! { "$max": expr.into() })
    }

    /// Push accumulator (creates array).
    pub fn push(expr: impl Into<Bson>) -> Bson {
        Bson::Document(doc! { "$push": expr.into() })
    }

    /// Count accumulator.
    pub fn count() -> Bson {
        Bson::Document(doc! { "$sum": 1 })
    }

    /// Count documents where a boolean expression holds (or, with `when = false`, fails).
    pub fn count_if(expr: impl Into<Bson>, when: bool) -> Bson {
        let (hit, miss) = if when { (1, 0) } else { (0, 1) };
        Bson::Document(doc! { "$sum": { "$cond": [expr.into(), hit, miss] } })
    }
}

/// Average, count and price range per genre, most expensive genre first.
pub fn average_price_by_genre() -> Vec<Document> {
    PipelineBuilder::new()
        .group_stage(
            BookField::Genre.path(),
            doc! {
                "avgPrice": accumulators::avg(BookField::Price.path()),
                "count": accumulators::count(),
                "minPrice": accumulators::min(BookField::Price.path()),
                "maxPrice": accumulators::max(BookField::Price.path()),
            },
        )
        .sort_stage(doc! { "avgPrice": -1 })
        .build()
}

/// Authors ranked by number of books, then by total pages.
pub fn books_by_author_ranked() -> Vec<Document> {
    PipelineBuilder::new()
        .group_stage(
            BookField::Author.path(),
            doc! {
                "count": accumulators::count(),
                "titles": accumulators::push(BookField::Title.path()),
                "totalPages": accumulators::sum(BookField::Pages.path()),
                "avgPrice": accumulators::avg(BookField::Price.path()),
            },
        )
        .sort_stage(doc! { "count": -1, "totalPages": -1 })
        .build()
}

/// Expression yielding the first year of the decade of `published_year` as an int.
pub fn decade_start_expr() -> Document {
    doc! {
        "$toInt": {
            "$multiply": [
                { "$floor": { "$divide": [BookField::PublishedYear.path(), 10] } },
                10
            ]
        }
    }
}

/// Expression turning a decade start year into a label, e.g. `1950` into `"1950s"`.
pub fn decade_label_expr(start: impl Into<Bson>) -> Document {
    doc! { "$concat": [{ "$toString": start.into() }, "s"] }
}

/// Books grouped by publication decade, oldest decade first.
///
/// Groups are keyed and sorted on the numeric start year so decades before
/// 1000 order ahead of later ones.
pub fn books_by_decade() -> Vec<Document> {
    PipelineBuilder::new()
        .add_fields_stage(doc! { "decadeStart": decade_start_expr() })
        .group_stage(
            "$decadeStart",
            doc! {
                "count": accumulators::count(),
                "books": accumulators::push(doc! {
                    "title": BookField::Title.path(),
                    "year": BookField::PublishedYear.path(),
                    "author": BookField::Author.path(),
                }),
                "avgPrice": accumulators::avg(BookField::Price.path()),
            },
        )
        .sort_stage(doc! { "_id": 1 })
        .add_fields_stage(doc! { "decade": decade_label_expr("$_id") })
        .build()
}

/// Whole-collection statistics in a single group.
pub fn collection_summary() -> Vec<Document> {
    let in_stock = BookField::InStock.path();
    PipelineBuilder::new()
        .group_stage(
            Bson::Null,
            doc! {
                "totalBooks": accumulators::count(),
                "avgPrice": accumulators::avg(BookField::Price.path()),
                "avgPages": accumulators::avg(BookField::Pages.path()),
                "inStockCount": accumulators::count_if(in_stock.as_str(), true),
                "outOfStockCount": accumulators::count_if(in_stock.as_str(), false),
                "oldestYear": accumulators::min(BookField::PublishedYear.path()),
                "newestYear": accumulators::max(BookField::PublishedYear.path()),
                "totalPages": accumulators::sum(BookField::Pages.path()),
                "totalValue": accumulators::sum(BookField::Price.path()),
            },
        )
        .build()
}

/// Count and titles per stock status.
pub fn stock_breakdown() -> Vec<Document> {
    PipelineBuilder::new()
        .group_stage(
            BookField::InStock.path(),
            doc! {
                "count": accumulators::count(),
                "titles": accumulators::push(BookField::Title.path()),
            },
        )
        .sort_stage(doc! { "_id": -1 })
        .build()
}

/// Count, average price and average length per genre, largest genre first.
pub fn genre_analysis() -> Vec<Document> {
    PipelineBuilder::new()
        .group_stage(
            BookField::Genre.path(),
            doc! {
                "count": accumulators::count(),
                "avgPrice": accumulators::avg(BookField::Price.path()),
                "avgPages": accumulators::avg(BookField::Pages.path()),
            },
        )
        .sort_stage(doc! { "count": -1 })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pipeline_builder() {
        let pipeline = PipelineBuilder::new()
            .match_stage(doc! { "in_stock": true })
            .group_stage("$genre", doc! { "count": accumulators::count() })
            .sort_stage(doc! { "count": -1 })
            .limit_stage(3)
            .build();

        assert_eq!(pipeline.len(), 4);
        assert!(pipeline[0].contains_key("$match"));
        assert!(pipeline[3].contains_key("$limit"));
    }

    #[test]
    fn test_group_stage_keeps_id_first() {
        let group = stages::group("$author", doc! { "n": accumulators::count() });
        let inner = group.get_document("$group").unwrap();
        assert_eq!(inner.keys().next().map(String::as_str), Some("_id"));
        assert_eq!(inner.get_str("_id").unwrap(), "$author");
    }

    #[test]
    fn test_accumulators() {
        let count = accumulators::count();
        assert_eq!(count.as_document().unwrap().get_i32("$sum").unwrap(), 1);

        let in_stock = accumulators::count_if("$in_stock", true);
        assert_eq!(
            in_stock,
            Bson::Document(doc! { "$sum": { "$cond": ["$in_stock", 1, 0] } })
        );

        let out_of_stock = accumulators::count_if("$in_stock", false);
        assert_eq!(
            out_of_stock,
            Bson::Document(doc! { "$sum": { "$cond": ["$in_stock", 0, 1] } })
        );
    }

    #[test]
    fn test_average_price_by_genre_shape() {
        let pipeline = average_price_by_genre();
        assert_eq!(
            pipeline,
            vec![
                doc! { "$group": {
                    "_id": "$genre",
                    "avgPrice": { "$avg": "$price" },
                    "count": { "$sum": 1 },
                    "minPrice": { "$min": "$price" },
                    "maxPrice": { "$max": "$price" },
                } },
                doc! { "$sort": { "avgPrice": -1 } },
            ]
        );
    }

    #[test]
    fn test_author_ranking_sorts_by_count_then_pages() {
        let pipeline = books_by_author_ranked();
        let sort = pipeline[1].get_document("$sort").unwrap();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["count", "totalPages"]);
        assert_eq!(sort.get_i32("count").unwrap(), -1);
    }

    #[test]
    fn test_decade_pipeline_shape() {
        let pipeline = books_by_decade();
        assert_eq!(pipeline.len(), 4);

        let add_fields = pipeline[0].get_document("$addFields").unwrap();
        assert_eq!(
            add_fields.get_document("decadeStart").unwrap(),
            &doc! { "$toInt": { "$multiply": [
                { "$floor": { "$divide": ["$published_year", 10] } },
                10
            ] } }
        );

        let group = pipeline[1].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$decadeStart");
        assert_eq!(pipeline[2], doc! { "$sort": { "_id": 1 } });
        assert_eq!(
            pipeline[3],
            doc! { "$addFields": { "decade": { "$concat": [{ "$toString": "$_id" }, "s"] } } }
        );
    }

    #[test]
    fn test_decade_sort_key_is_numeric() {
        let pipeline = books_by_decade();
        let sort = pipeline[2].get_document("$sort").unwrap();
        assert_eq!(sort.keys().collect::<Vec<_>>(), vec!["_id"]);

        // The grouped key is the $toInt start year, never the "NNNNs" label.
        let group = pipeline[1].get_document("$group").unwrap();
        assert_ne!(group.get_str("_id").unwrap(), "$decade");
        assert!(
            pipeline[0]
                .get_document("$addFields")
                .unwrap()
                .get_document("decadeStart")
                .unwrap()
                .contains_key("$toInt")
        );
    }

    #[test]
    fn test_collection_summary_groups_everything() {
        let pipeline = collection_summary();
        assert_eq!(pipeline.len(), 1);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get("_id"), Some(&Bson::Null));
        for key in [
            "totalBooks",
            "avgPrice",
            "avgPages",
            "inStockCount",
            "outOfStockCount",
            "oldestYear",
            "newestYear",
            "totalPages",
            "totalValue",
        ] {
            assert!(group.contains_key(key), "missing accumulator {key}");
        }
    }

    #[test]
    fn test_genre_analysis_sorted_by_count() {
        let pipeline = genre_analysis();
        assert_eq!(pipeline[1], doc! { "$sort": { "count": -1 } });
    }
}
