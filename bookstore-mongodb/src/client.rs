//! Client lifecycle: connect once, hand out facades, shut down.

use std::future::Future;
use std::sync::Arc;

use bson::Document;
use mongodb::{Client, Database};
use tracing::{debug, info};

use crate::book::Book;
use crate::config::MongoConfig;
use crate::error::{MongoError, MongoResult};
use crate::facade::BookQueryFacade;

/// A connection to the bookstore database.
///
/// Built once with [`BookstoreClient::connect`] and passed explicitly to
/// whatever needs it. [`BookstoreClient::close`] releases the driver's
/// connections; [`BookstoreClient::scoped`] does both around a closure.
#[derive(Clone)]
pub struct BookstoreClient {
    client: Client,
    database: Database,
    config: Arc<MongoConfig>,
}

impl BookstoreClient {
    /// Create a new client from configuration.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let options = config.to_client_options().await?;

        let client = Client::with_options(options)
            .map_err(|e| MongoError::connection(format!("failed to create client: {}", e)))?;

        let database = client.database(&config.database);

        info!(
            uri = %config.uri,
            database = %config.database,
            collection = %config.collection,
            "MongoDB client created"
        );

        Ok(Self {
            client,
            database,
            config: Arc::new(config),
        })
    }

    /// Connect, run `f` with a facade over the configured collection, then shut down.
    ///
    /// The client is shut down whether `f` succeeds or fails; `f`'s result is returned.
    pub async fn scoped<F, Fut, T>(config: MongoConfig, f: F) -> MongoResult<T>
    where
        F: FnOnce(BookQueryFacade) -> Fut,
        Fut: Future<Output = MongoResult<T>>,
    {
        let client = Self::connect(config).await?;
        let result = f(client.facade()).await;
        client.close().await;
        result
    }

    /// Facade over the configured books collection.
    pub fn facade(&self) -> BookQueryFacade {
        self.facade_for(&self.config.collection)
    }

    /// Facade over another collection in the same database.
    pub fn facade_for(&self, collection: &str) -> BookQueryFacade {
        BookQueryFacade::new(
            self.database.collection::<Book>(collection),
            self.database.clone(),
        )
    }

    /// Run a database command.
    pub async fn run_command(&self, command: Document) -> MongoResult<Document> {
        Ok(self.database.run_command(command, None).await?)
    }

    /// Shut the driver down, closing its connections.
    pub async fn close(self) {
        debug!(database = %self.config.database, "Closing MongoDB client");
        self.client.shutdown().await;
    }
}
