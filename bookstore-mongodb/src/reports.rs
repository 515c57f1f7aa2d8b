//! Typed records for aggregation results.
//!
//! Each pipeline in [`pipeline`](crate::pipeline) produces documents of one
//! fixed shape; these structs give that shape a name. The group key always
//! arrives as `_id` and is renamed to what it means.

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Price statistics for one genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenrePriceStats {
    #[serde(rename = "_id")]
    pub genre: String,
    pub avg_price: f64,
    pub count: i64,
    pub min_price: f64,
    pub max_price: f64,
}

/// One author's catalogue summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRanking {
    #[serde(rename = "_id")]
    pub author: String,
    pub count: i64,
    pub titles: Vec<String>,
    pub total_pages: i64,
    pub avg_price: f64,
}

/// A book as listed inside a decade group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeBook {
    pub title: String,
    pub year: i32,
    pub author: String,
}

/// Books published within one decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecadeGroup {
    /// First year of the decade, e.g. `1950`.
    #[serde(rename = "_id")]
    pub decade_start: i32,
    /// Label such as `"1950s"`.
    pub decade: String,
    pub count: i64,
    pub books: Vec<DecadeBook>,
    pub avg_price: f64,
}

/// Whole-collection statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub total_books: i64,
    pub avg_price: f64,
    pub avg_pages: f64,
    pub in_stock_count: i64,
    pub out_of_stock_count: i64,
    pub oldest_year: i32,
    pub newest_year: i32,
    pub total_pages: i64,
    pub total_value: f64,
}

/// Books sharing one stock status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatus {
    #[serde(rename = "_id")]
    pub in_stock: bool,
    pub count: i64,
    pub titles: Vec<String>,
}

impl StockStatus {
    /// Human label for the status.
    pub fn label(&self) -> &'static str {
        if self.in_stock { "In Stock" } else { "Out of Stock" }
    }
}

/// Size and averages for one genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreAnalysis {
    #[serde(rename = "_id")]
    pub genre: String,
    pub count: i64,
    pub avg_price: f64,
    pub avg_pages: f64,
}

/// The most and least expensive books.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceExtremes {
    pub most_expensive: Book,
    pub cheapest: Book,
}

/// The longest and shortest books.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthExtremes {
    pub longest: Book,
    pub shortest: Book,
}
