//! MongoDB connection configuration.

use std::time::Duration;

use mongodb::options::ClientOptions;

use crate::error::{MongoError, MongoResult};

/// Default connection URI.
pub const DEFAULT_URI: &str = "mongodb://localhost:27017";

/// Default database name.
pub const DEFAULT_DATABASE: &str = "plp_bookstore";

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "books";

/// MongoDB connection configuration.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB connection URI.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Collection holding the book documents.
    pub collection: String,
    /// Application name (shown in server logs).
    pub app_name: Option<String>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Server selection timeout.
    pub server_selection_timeout: Option<Duration>,
    /// Direct connection (bypass replica set discovery).
    pub direct_connection: Option<bool>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            app_name: Some("bookstore".to_string()),
            connect_timeout: Some(Duration::from_secs(10)),
            server_selection_timeout: Some(Duration::from_secs(30)),
            direct_connection: None,
        }
    }
}

impl MongoConfig {
    /// Create a new configuration from a MongoDB URI.
    pub fn from_uri(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> MongoConfigBuilder {
        MongoConfigBuilder::new()
    }

    /// Convert to MongoDB ClientOptions.
    pub async fn to_client_options(&self) -> MongoResult<ClientOptions> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| MongoError::config(format!("failed to parse URI: {}", e)))?;

        if let Some(ref app_name) = self.app_name {
            options.app_name = Some(app_name.clone());
        }

        if let Some(connect_timeout) = self.connect_timeout {
            options.connect_timeout = Some(connect_timeout);
        }

        if let Some(selection_timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(selection_timeout);
        }

        if let Some(direct) = self.direct_connection {
            options.direct_connection = Some(direct);
        }

        Ok(options)
    }
}

/// Builder for MongoDB configuration.
#[derive(Debug, Default)]
pub struct MongoConfigBuilder {
    uri: Option<String>,
    database: Option<String>,
    collection: Option<String>,
    app_name: Option<String>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
    direct_connection: Option<bool>,
}

impl MongoConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MongoDB URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the server selection timeout.
    pub fn server_selection_timeout(mut self, duration: Duration) -> Self {
        self.server_selection_timeout = Some(duration);
        self
    }

    /// Enable direct connection (bypass replica set discovery).
    pub fn direct_connection(mut self, enabled: bool) -> Self {
        self.direct_connection = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MongoResult<MongoConfig> {
        let database = self.database.unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        if database.is_empty() {
            return Err(MongoError::config("database name must not be empty"));
        }

        let collection = self
            .collection
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if collection.is_empty() {
            return Err(MongoError::config("collection name must not be empty"));
        }

        Ok(MongoConfig {
            uri: self.uri.unwrap_or_else(|| DEFAULT_URI.to_string()),
            database,
            collection,
            app_name: self.app_name.or(Some("bookstore".to_string())),
            connect_timeout: self.connect_timeout.or(Some(Duration::from_secs(10))),
            server_selection_timeout: self
                .server_selection_timeout
                .or(Some(Duration::from_secs(30))),
            direct_connection: self.direct_connection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_uri() {
        let config = MongoConfig::from_uri("mongodb://db.internal:27017", "shop");
        assert_eq!(config.uri, "mongodb://db.internal:27017");
        assert_eq!(config.database, "shop");
        assert_eq!(config.collection, "books");
    }

    #[test]
    fn test_config_builder() {
        let config = MongoConfig::builder()
            .uri("mongodb://localhost:27017")
            .database("library")
            .collection("novels")
            .app_name("test-app")
            .connect_timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert_eq!(config.database, "library");
        assert_eq!(config.collection, "novels");
        assert_eq!(config.app_name, Some("test-app".to_string()));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = MongoConfig::builder().build().unwrap();
        assert_eq!(config.uri, DEFAULT_URI);
        assert_eq!(config.database, "plp_bookstore");
        assert_eq!(config.collection, "books");
        assert_eq!(config.server_selection_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_builder_rejects_empty_names() {
        assert!(MongoConfig::builder().database("").build().is_err());
        assert!(MongoConfig::builder().collection("").build().is_err());
    }

    #[tokio::test]
    async fn test_to_client_options_applies_overrides() {
        let config = MongoConfig::builder()
            .app_name("bookstore-test")
            .direct_connection(true)
            .build()
            .unwrap();

        let options = config.to_client_options().await.unwrap();
        assert_eq!(options.app_name.as_deref(), Some("bookstore-test"));
        assert_eq!(options.direct_connection, Some(true));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_to_client_options_rejects_bad_uri() {
        let config = MongoConfig::from_uri("postgres://localhost", "db");
        let err = config.to_client_options().await.unwrap_err();
        assert!(matches!(err, MongoError::Config(_)));
    }
}
