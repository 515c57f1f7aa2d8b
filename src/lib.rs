//! # Bookstore
//!
//! Typed MongoDB queries, aggregations and index management over a
//! catalogue of books.
//!
//! Bookstore provides:
//! - A query facade with one method per capability (finds, updates, paging)
//! - Typed aggregation reports (genre pricing, author rankings, decades, stock)
//! - Idempotent index creation and `explain` diagnostics
//! - A `bookstore` command-line walkthrough (see the `bookstore-cli` crate)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookstore::prelude::*;
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MongoError> {
//!     let config = MongoConfig::from_uri("mongodb://localhost:27017", "plp_bookstore");
//!
//!     let client = BookstoreClient::connect(config).await?;
//!     let books = client.facade();
//!
//!     books.update_price("The Great Gatsby", 12.99).await?;
//!     let fiction: Vec<Book> = books.find_by_genre("Fiction").await?.try_collect().await?;
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Aggregation pipelines and filter documents.
pub mod query {
    pub use bookstore_mongodb::{filter, pipeline};
    pub use bookstore_mongodb::pipeline::{PipelineBuilder, accumulators, stages};
}

/// Typed aggregation and diagnostics records.
pub mod reports {
    pub use bookstore_mongodb::explain::ExplainReport;
    pub use bookstore_mongodb::index::{IndexInfo, IndexOutcome};
    pub use bookstore_mongodb::reports::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use bookstore_mongodb::prelude::*;
}

// Re-export key types at the crate root
pub use bookstore_mongodb::fixtures::sample_books;
pub use bookstore_mongodb::{
    Book, BookField, BookQueryFacade, BookstoreClient, Cursor, IndexSpec, MongoConfig,
    MongoError, MongoResult, PartialBook, SortDirection,
};
