//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use bookstore_mongodb::MongoConfig;
use bookstore_mongodb::config::{DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_URI};

use crate::cli::ConnectionArgs;
use crate::error::CliResult;

/// Default config file name (lives in the working directory)
pub const CONFIG_FILE_NAME: &str = "bookstore.toml";

/// Bookstore CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Walkthrough parameters
    pub demo: DemoConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, args: &ConnectionArgs) -> Self {
        if let Some(uri) = &args.uri {
            self.database.uri = uri.clone();
        }
        if let Some(name) = &args.database {
            self.database.name = name.clone();
        }
        if let Some(collection) = &args.collection {
            self.database.collection = collection.clone();
        }
        self
    }

    /// Load the file named by `--config` and apply the remaining flags to it
    pub fn resolve(args: &ConnectionArgs) -> CliResult<Self> {
        Ok(Self::load_or_default(&args.config)?.with_overrides(args))
    }

    /// Driver configuration for the resolved connection settings
    pub fn mongo_config(&self) -> CliResult<MongoConfig> {
        let db = &self.database;
        let mut builder = MongoConfig::builder()
            .uri(db.uri.as_str())
            .database(db.name.as_str())
            .collection(db.collection.as_str())
            .connect_timeout(Duration::from_secs(db.connect_timeout_secs))
            .server_selection_timeout(Duration::from_secs(db.server_selection_timeout_secs));

        if let Some(direct) = db.direct_connection {
            builder = builder.direct_connection(direct);
        }

        Ok(builder.build()?)
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string
    pub uri: String,

    /// Database name
    pub name: String,

    /// Books collection name
    pub collection: String,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,

    /// Connect to a single host without topology discovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_connection: Option<bool>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            name: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
            direct_connection: None,
        }
    }
}

/// Parameters of the walkthrough queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Genre listed first and used for the unindexed explain
    pub genre: String,

    /// Cut-off year for "published after"
    pub published_after: i32,

    /// Author listed in the CRUD section
    pub author: String,

    /// Title whose price gets updated
    pub update_title: String,

    /// Price written by the update
    pub new_price: f64,

    /// Title of the book inserted and then deleted
    pub temp_title: String,

    /// Cut-off year for "in stock and published after"
    pub in_stock_after: i32,

    /// Number of books shown with a projection
    pub projection_limit: i64,

    /// Number of books shown per sort direction
    pub sort_limit: i64,

    /// Books per page
    pub page_size: u64,

    /// Number of pages shown
    pub pages: u64,

    /// Author used for the compound index explain
    pub explain_author: String,

    /// Lower bound year for the compound index explain
    pub explain_since: i32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            genre: "Fiction".to_string(),
            published_after: 1950,
            author: "George Orwell".to_string(),
            update_title: "The Great Gatsby".to_string(),
            new_price: 12.99,
            temp_title: "Temporary Test Book".to_string(),
            in_stock_after: 2010,
            projection_limit: 7,
            sort_limit: 6,
            page_size: 5,
            pages: 3,
            explain_author: "J.R.R. Tolkien".to_string(),
            explain_since: 1950,
        }
    }
}
