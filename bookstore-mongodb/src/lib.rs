//! # bookstore-mongodb
//!
//! A thin, typed query facade over a MongoDB `books` collection.
//!
//! This crate provides:
//! - Connection management with the official MongoDB driver
//! - The [`Book`] document model and typed field names
//! - Filter and aggregation pipeline builders
//! - Typed records for every aggregation result
//! - Index creation that tolerates conflicting definitions
//! - `explain` diagnostics
//!
//! ## Example
//!
//! ```rust,ignore
//! use bookstore_mongodb::{BookstoreClient, MongoConfig};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MongoConfig::builder()
//!         .uri("mongodb://localhost:27017")
//!         .database("plp_bookstore")
//!         .build()?;
//!
//!     BookstoreClient::scoped(config, |books| async move {
//!         let mut fiction = books.find_by_genre("Fiction").await?;
//!         while let Some(book) = fiction.try_next().await? {
//!             println!("{} by {}", book.title, book.author);
//!         }
//!         Ok(())
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod book;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod explain;
pub mod facade;
pub mod filter;
pub mod fixtures;
pub mod index;
pub mod pipeline;
pub mod reports;

pub use bson::oid::ObjectId;
pub use bson::{Bson, Document, doc};
pub use book::{Book, BookField, PartialBook, SortDirection};
pub use client::BookstoreClient;
pub use config::{MongoConfig, MongoConfigBuilder};
pub use error::{MongoError, MongoResult};
pub use explain::ExplainReport;
pub use facade::BookQueryFacade;
pub use filter::FilterBuilder;
pub use index::{IndexInfo, IndexOutcome, IndexSpec};
pub use mongodb::Cursor;
pub use reports::{
    AuthorRanking, CollectionSummary, DecadeBook, DecadeGroup, GenreAnalysis, GenrePriceStats,
    LengthExtremes, PriceExtremes, StockStatus,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::book::{Book, BookField, PartialBook, SortDirection};
    pub use crate::client::BookstoreClient;
    pub use crate::config::{MongoConfig, MongoConfigBuilder};
    pub use crate::document::DocumentExt;
    pub use crate::error::{MongoError, MongoResult};
    pub use crate::facade::BookQueryFacade;
    pub use crate::filter::FilterBuilder;
    pub use crate::index::{IndexOutcome, IndexSpec};
    pub use crate::pipeline::{PipelineBuilder, accumulators, stages};
    pub use bson::oid::ObjectId;
    pub use bson::{Bson, Document, doc};
}
