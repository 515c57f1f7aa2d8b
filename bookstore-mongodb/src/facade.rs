//! The bookstore query facade.
//!
//! One method per demonstrated capability. Each call is a single round trip
//! (or a pair, for the extremes) to the server; nothing is cached and no
//! state is kept between calls. Reads return the driver's [`Cursor`], a
//! finite stream that is consumed once. Call the method again to start over.

use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::{FindOneOptions, FindOptions};
use mongodb::{Collection, Cursor, Database, IndexModel};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::book::{Book, BookField, PartialBook, SortDirection, projection, sort_by};
use crate::error::{MongoError, MongoResult};
use crate::explain::ExplainReport;
use crate::filter;
use crate::index::{IndexInfo, IndexOutcome, IndexSpec};
use crate::pipeline;
use crate::reports::{
    AuthorRanking, CollectionSummary, DecadeGroup, GenreAnalysis, GenrePriceStats,
    LengthExtremes, PriceExtremes, StockStatus,
};

/// Named operations over a books collection.
///
/// Obtained from [`BookstoreClient::facade`](crate::client::BookstoreClient::facade).
/// Cloning is cheap; clones share the client's connections.
#[derive(Clone)]
pub struct BookQueryFacade {
    books: Collection<Book>,
    database: Database,
}

impl BookQueryFacade {
    pub(crate) fn new(books: Collection<Book>, database: Database) -> Self {
        Self { books, database }
    }

    /// Name of the underlying collection.
    pub fn collection_name(&self) -> &str {
        self.books.name()
    }

    // ==================== Filtered reads ====================

    /// All books in `genre`.
    pub async fn find_by_genre(&self, genre: &str) -> MongoResult<Cursor<Book>> {
        self.find(filter::by_genre(genre), None).await
    }

    /// Books published strictly after `year`.
    pub async fn find_published_after(&self, year: i32) -> MongoResult<Cursor<Book>> {
        self.find(filter::published_after(year), None).await
    }

    /// Books written by `author`.
    pub async fn find_by_author(&self, author: &str) -> MongoResult<Cursor<Book>> {
        self.find(filter::by_author(author), None).await
    }

    /// Books in stock and published strictly after `year`.
    pub async fn find_in_stock_after_year(&self, year: i32) -> MongoResult<Cursor<Book>> {
        self.find(filter::in_stock_after(year), None).await
    }

    /// The first book titled `title`, if any.
    pub async fn find_one_by_title(&self, title: &str) -> MongoResult<Option<Book>> {
        debug!(collection = %self.collection_name(), title = %title, "find_one by title");
        Ok(self.books.find_one(filter::by_title(title), None).await?)
    }

    /// Every book, ordered by `_id` (the same order [`find_page`](Self::find_page) uses).
    pub async fn find_all(&self) -> MongoResult<Cursor<Book>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        self.find(filter::all(), options).await
    }

    // ==================== Writes ====================

    /// Set the price of the first book titled `title`.
    ///
    /// Returns the number of documents modified: 0 when no title matches
    /// (or the price was already `new_price`), otherwise 1.
    pub async fn update_price(&self, title: &str, new_price: f64) -> MongoResult<u64> {
        let price = BookField::Price.as_str();
        let result = self
            .books
            .update_one(
                filter::by_title(title),
                doc! { "$set": { price: new_price } },
                None,
            )
            .await?;

        debug!(
            title = %title,
            price = new_price,
            matched = result.matched_count,
            modified = result.modified_count,
            "update_price"
        );
        Ok(result.modified_count)
    }

    /// Delete the first book titled `title`; returns 0 or 1.
    pub async fn delete_by_title(&self, title: &str) -> MongoResult<u64> {
        let result = self.books.delete_one(filter::by_title(title), None).await?;
        debug!(title = %title, deleted = result.deleted_count, "delete_by_title");
        Ok(result.deleted_count)
    }

    /// Insert one book and return its new identifier.
    pub async fn insert_book(&self, book: &Book) -> MongoResult<ObjectId> {
        let result = self.books.insert_one(book, None).await?;
        debug!(title = %book.title, "insert_book");
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| MongoError::query("inserted _id is not an ObjectId"))
    }

    /// Insert many books; returns how many were written.
    pub async fn insert_many(&self, books: &[Book]) -> MongoResult<usize> {
        if books.is_empty() {
            return Ok(0);
        }
        let result = self.books.insert_many(books, None).await?;
        debug!(count = result.inserted_ids.len(), "insert_many");
        Ok(result.inserted_ids.len())
    }

    /// Drop the whole collection, indexes included.
    pub async fn drop_collection(&self) -> MongoResult<()> {
        debug!(collection = %self.collection_name(), "Dropping collection");
        self.books.drop(None).await?;
        Ok(())
    }

    // ==================== Shaped reads ====================

    /// Up to `limit` books with only `fields` returned; `_id` is always excluded.
    pub async fn find_with_projection(
        &self,
        fields: &[BookField],
        limit: i64,
    ) -> MongoResult<Cursor<PartialBook>> {
        let options = FindOptions::builder()
            .projection(projection(fields))
            .limit(limit)
            .build();

        debug!(fields = ?fields, limit, "find_with_projection");
        Ok(self
            .books
            .clone_with_type::<PartialBook>()
            .find(filter::all(), options)
            .await?)
    }

    /// Up to `limit` books ordered by `field`. Ties come back in the store's natural order.
    pub async fn find_sorted(
        &self,
        field: BookField,
        direction: SortDirection,
        limit: i64,
    ) -> MongoResult<Cursor<Book>> {
        let options = FindOptions::builder()
            .sort(sort_by(field, direction))
            .limit(limit)
            .build();
        self.find(filter::all(), options).await
    }

    /// Page `page_number` (1-based) of `page_size` books, ordered by `_id`.
    ///
    /// No total is returned; use [`count_all`](Self::count_all) for that.
    pub async fn find_page(&self, page_size: u64, page_number: u64) -> MongoResult<Cursor<Book>> {
        let options = page_options(page_size, page_number)?;
        self.find(filter::all(), options).await
    }

    /// Number of books in the collection.
    pub async fn count_all(&self) -> MongoResult<u64> {
        self.count_matching(filter::all()).await
    }

    /// Number of books matching `filter`.
    pub async fn count_matching(&self, filter: Document) -> MongoResult<u64> {
        Ok(self.books.count_documents(filter, None).await?)
    }

    // ==================== Aggregations ====================

    /// Average, count and price range per genre, highest average first.
    pub async fn average_price_by_genre(&self) -> MongoResult<Cursor<GenrePriceStats>> {
        self.aggregate(pipeline::average_price_by_genre()).await
    }

    /// Authors by number of books, then by total pages.
    pub async fn books_by_author_ranked(&self) -> MongoResult<Cursor<AuthorRanking>> {
        self.aggregate(pipeline::books_by_author_ranked()).await
    }

    /// Books grouped by publication decade, oldest first.
    pub async fn books_by_decade(&self) -> MongoResult<Cursor<DecadeGroup>> {
        self.aggregate(pipeline::books_by_decade()).await
    }

    /// Statistics over the whole collection; `None` when it is empty.
    pub async fn collection_summary(&self) -> MongoResult<Option<CollectionSummary>> {
        let mut cursor = self
            .aggregate::<CollectionSummary>(pipeline::collection_summary())
            .await?;
        Ok(cursor.try_next().await?)
    }

    /// Count and titles per stock status, in-stock first.
    pub async fn stock_breakdown(&self) -> MongoResult<Cursor<StockStatus>> {
        self.aggregate(pipeline::stock_breakdown()).await
    }

    /// Count, average price and average length per genre, largest genre first.
    pub async fn genre_analysis(&self) -> MongoResult<Cursor<GenreAnalysis>> {
        self.aggregate(pipeline::genre_analysis()).await
    }

    /// Most and least expensive books; `None` when the collection is empty.
    pub async fn price_extremes(&self) -> MongoResult<Option<PriceExtremes>> {
        let most_expensive = self.first_by(BookField::Price, SortDirection::Descending);
        let cheapest = self.first_by(BookField::Price, SortDirection::Ascending);
        Ok(match (most_expensive.await?, cheapest.await?) {
            (Some(most_expensive), Some(cheapest)) => Some(PriceExtremes {
                most_expensive,
                cheapest,
            }),
            _ => None,
        })
    }

    /// Longest and shortest books; `None` when the collection is empty.
    pub async fn length_extremes(&self) -> MongoResult<Option<LengthExtremes>> {
        let longest = self.first_by(BookField::Pages, SortDirection::Descending);
        let shortest = self.first_by(BookField::Pages, SortDirection::Ascending);
        Ok(match (longest.await?, shortest.await?) {
            (Some(longest), Some(shortest)) => Some(LengthExtremes { longest, shortest }),
            _ => None,
        })
    }

    // ==================== Indexes ====================

    /// Create the index described by `spec`.
    ///
    /// Re-creating an identical index succeeds with its name. A conflicting
    /// definition is logged and returned as [`IndexOutcome::Conflict`]; any
    /// other failure is returned as an error.
    pub async fn ensure_index(&self, spec: &IndexSpec) -> MongoResult<IndexOutcome> {
        if spec.is_empty() {
            return Err(MongoError::invalid_argument("index needs at least one key"));
        }

        match self
            .books
            .create_index(IndexModel::from(spec), None)
            .await
            .map_err(MongoError::from_index_error)
        {
            Ok(result) => {
                debug!(index = %result.index_name, "Index ensured");
                Ok(IndexOutcome::Created(result.index_name))
            }
            Err(MongoError::IndexConflict(reason)) => {
                let keys = spec.keys_json();
                warn!(keys = %keys, reason = %reason, "Index may already exist");
                Ok(IndexOutcome::Conflict { keys, reason })
            }
            Err(e) => Err(e),
        }
    }

    /// Every index on the collection, `_id_` included.
    pub async fn list_indexes(&self) -> MongoResult<Vec<IndexInfo>> {
        let cursor = self.books.list_indexes(None).await?;
        let models: Vec<IndexModel> = cursor.try_collect().await?;
        Ok(models.into_iter().map(IndexInfo::from_model).collect())
    }

    /// Execution statistics for a find with `filter`. Read-only.
    pub async fn explain(&self, filter: Document) -> MongoResult<ExplainReport> {
        debug!(filter = %filter, "explain");
        let command = ExplainReport::command(self.collection_name(), filter);
        let response = self.database.run_command(command, None).await?;
        ExplainReport::from_response(&response)
    }

    // ==================== Helpers ====================

    async fn find(
        &self,
        filter: Document,
        options: impl Into<Option<FindOptions>>,
    ) -> MongoResult<Cursor<Book>> {
        debug!(collection = %self.collection_name(), filter = %filter, "find");
        Ok(self.books.find(filter, options).await?)
    }

    async fn aggregate<T>(&self, pipeline: Vec<Document>) -> MongoResult<Cursor<T>>
    where
        T: DeserializeOwned,
    {
        debug!(collection = %self.collection_name(), stages = pipeline.len(), "aggregate");
        let cursor = self.books.aggregate(pipeline, None).await?;
        Ok(cursor.with_type::<T>())
    }

    async fn first_by(
        &self,
        field: BookField,
        direction: SortDirection,
    ) -> MongoResult<Option<Book>> {
        let options = FindOneOptions::builder()
            .sort(sort_by(field, direction))
            .build();
        Ok(self.books.find_one(filter::all(), options).await?)
    }
}

/// Find options for a 1-based page ordered by `_id`.
pub fn page_options(page_size: u64, page_number: u64) -> MongoResult<FindOptions> {
    if page_size == 0 {
        return Err(MongoError::invalid_argument("page size must be at least 1"));
    }
    if page_number == 0 {
        return Err(MongoError::invalid_argument("page numbers start at 1"));
    }

    let skip = page_size
        .checked_mul(page_number - 1)
        .ok_or_else(|| MongoError::invalid_argument("page offset overflows"))?;
    let limit = i64::try_from(page_size)
        .map_err(|_| MongoError::invalid_argument("page size too large"))?;

    Ok(FindOptions::builder()
        .sort(doc! { "_id": 1 })
        .skip(skip)
        .limit(limit)
        .build())
}
