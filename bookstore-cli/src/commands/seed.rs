//! `bookstore seed` command - Load books into the collection.
//!
//! Books come from a JSON array file, or from the built-in twelve-book catalogue
//! when no file is given. The file is read and validated before any connection
//! is opened.

use std::path::Path;

use bookstore_mongodb::fixtures::sample_books;
use bookstore_mongodb::{Book, BookstoreClient};
use tracing::info;

use crate::cli::SeedArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output::{self, confirm, kv, success};

/// Run the seed command
pub async fn run(args: SeedArgs, config: Config) -> CliResult<()> {
    output::header("Seed books");

    let (books, source) = match &args.file {
        Some(path) => (load_books(path)?, path.display().to_string()),
        None => (sample_books(), "built-in catalogue".to_string()),
    };

    if books.is_empty() {
        output::warn("Seed file contains no books, nothing to insert");
        return Ok(());
    }

    let mongo = config.mongo_config()?;
    kv("Database", &mongo.database);
    kv("Collection", &mongo.collection);
    kv("Source", &source);
    output::newline();

    if args.drop
        && !args.yes
        && !confirm(&format!("Drop collection '{}' first?", mongo.collection))
    {
        output::info("Seeding cancelled");
        return Ok(());
    }

    let drop = args.drop;
    let inserted = BookstoreClient::scoped(mongo, |facade| async move {
        if drop {
            facade.drop_collection().await?;
            output::info(&format!("Dropped '{}'", facade.collection_name()));
        }
        facade.insert_many(&books).await
    })
    .await?;

    info!(inserted, source = %source, "seed complete");
    success(&format!("Inserted {} book(s)", inserted));

    Ok(())
}

/// Read a JSON array of books from `path`.
pub fn load_books(path: &Path) -> CliResult<Vec<Book>> {
    if !path.exists() {
        return Err(CliError::Seed(format!(
            "Seed file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let books: Vec<Book> = serde_json::from_str(&content)?;
    Ok(books)
}
