//! `bookstore demo` command - Walk through the query catalogue.
//!
//! Sections run in a fixed order: CRUD, advanced queries, aggregations,
//! indexing and statistics, closing with the document count. Each step
//! prints its results before the next query is issued.

use bookstore_mongodb::facade::page_options;
use bookstore_mongodb::filter;
use bookstore_mongodb::{
    Book, BookField, BookQueryFacade, BookstoreClient, Cursor, ExplainReport, IndexOutcome,
    IndexSpec, MongoResult, SortDirection,
};
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cli::{DemoArgs, Section};
use crate::config::{Config, DemoConfig};
use crate::error::CliResult;
use crate::output::{self, detail, line, list_item, numbered_item, price, thousands};

/// Run the demo command
pub async fn run(args: DemoArgs, config: Config) -> CliResult<()> {
    let mongo = config.mongo_config()?;
    let demo = config.demo;
    let section = args.section;

    output::banner("📚 PLP BOOKSTORE - MONGODB QUERIES");
    debug!(section = %section, database = %mongo.database, "starting walkthrough");

    BookstoreClient::scoped(mongo, |books| async move {
        walkthrough(&books, &demo, section).await
    })
    .await?;

    Ok(())
}

async fn walkthrough(
    books: &BookQueryFacade,
    demo: &DemoConfig,
    section: Section,
) -> MongoResult<()> {
    if section.includes(Section::Crud) {
        crud(books, demo).await?;
    }
    if section.includes(Section::Queries) {
        queries(books, demo).await?;
    }
    if section.includes(Section::Aggregation) {
        aggregation(books).await?;
    }
    if section.includes(Section::Indexing) {
        indexing(books, demo).await?;
    }
    if section.includes(Section::Stats) {
        statistics(books).await?;
    }

    let total = books.count_all().await?;
    output::newline();
    output::rule();
    output::success("All MongoDB queries completed successfully!");
    output::info(&format!("Total documents in collection: {}", total));
    output::rule();
    Ok(())
}

/// Drain `cursor`, handing each item and its zero-based position to `print`.
async fn print_each<T, F>(mut cursor: Cursor<T>, mut print: F) -> MongoResult<usize>
where
    T: DeserializeOwned + Unpin + Send + Sync,
    F: FnMut(usize, T),
{
    let mut count = 0;
    while let Some(item) = cursor.try_next().await? {
        print(count, item);
        count += 1;
    }
    if count == 0 {
        output::dim("   (no results)");
    }
    Ok(count)
}

// =============================================================================
// CRUD
// =============================================================================

async fn crud(books: &BookQueryFacade, demo: &DemoConfig) -> MongoResult<()> {
    output::header("🔍 BASIC CRUD OPERATIONS");

    output::section(&format!("1. Find all {} books:", demo.genre));
    print_each(books.find_by_genre(&demo.genre).await?, |_, b: Book| {
        list_item(&format!(
            "{} by {} ({}) - {}",
            b.title,
            b.author,
            b.published_year,
            price(b.price)
        ))
    })
    .await?;

    output::section(&format!("2. Books published after {}:", demo.published_after));
    print_each(books.find_published_after(demo.published_after).await?, |_, b: Book| {
        list_item(&format!("{} ({}) by {}", b.title, b.published_year, b.author))
    })
    .await?;

    output::section(&format!("3. Books by {}:", demo.author));
    print_each(books.find_by_author(&demo.author).await?, |_, b: Book| {
        list_item(&format!("{} ({}) - {} pages", b.title, b.published_year, b.pages))
    })
    .await?;

    let current = books.find_one_by_title(&demo.update_title).await?;
    match &current {
        Some(book) => output::section(&format!(
            "4. Updating price of '{}' from {} to {}:",
            demo.update_title,
            price(book.price),
            price(demo.new_price)
        )),
        None => output::section(&format!(
            "4. Updating price of '{}' to {}:",
            demo.update_title,
            price(demo.new_price)
        )),
    }
    let modified = books.update_price(&demo.update_title, demo.new_price).await?;
    line(&format!("Modified {} document(s)", modified));
    match books.find_one_by_title(&demo.update_title).await? {
        Some(book) => line(&format!("New price: {}", price(book.price))),
        None => line(&format!("'{}' is not in the collection", demo.update_title)),
    }

    output::section("5. Deleting a book by title:");
    let sentinel = Book::new(
        demo.temp_title.as_str(),
        "Test Author",
        "Test Genre",
        2023,
        9.99,
        true,
        100,
        "Test Publisher",
    );
    books.insert_book(&sentinel).await?;
    line("Added temporary book for deletion test");
    let deleted = books.delete_by_title(&demo.temp_title).await?;
    line(&format!("Deleted {} document(s)", deleted));

    Ok(())
}

// =============================================================================
// Advanced queries
// =============================================================================

async fn queries(books: &BookQueryFacade, demo: &DemoConfig) -> MongoResult<()> {
    output::header("🔍 ADVANCED QUERIES");

    output::section(&format!(
        "1. Books in stock AND published after {}:",
        demo.in_stock_after
    ));
    print_each(
        books.find_in_stock_after_year(demo.in_stock_after).await?,
        |_, b: Book| list_item(&format!("{} by {} ({})", b.title, b.author, b.published_year)),
    )
    .await?;

    output::section("2. Books with projection (title, author, price only):");
    let fields = [BookField::Title, BookField::Author, BookField::Price];
    let shown = print_each(
        books
            .find_with_projection(&fields, demo.projection_limit)
            .await?,
        |_, b| {
            list_item(&format!(
                "\"{}\" by {} - {}",
                b.title.unwrap_or_default(),
                b.author.unwrap_or_default(),
                b.price.map(price).unwrap_or_default()
            ))
        },
    )
    .await?;
    output::newline();
    line(&format!("... (showing first {} books with projection)", shown));

    output::section("3. Books sorted by price (ascending - cheapest first):");
    print_each(
        books
            .find_sorted(BookField::Price, SortDirection::Ascending, demo.sort_limit)
            .await?,
        |_, b: Book| list_item(&format!("{} - {}", b.title, price(b.price))),
    )
    .await?;

    output::section("4. Books sorted by price (descending - most expensive first):");
    print_each(
        books
            .find_sorted(BookField::Price, SortDirection::Descending, demo.sort_limit)
            .await?,
        |_, b: Book| list_item(&format!("{} - {}", b.title, price(b.price))),
    )
    .await?;

    output::section(&format!(
        "5. Pagination Example - {} books per page:",
        demo.page_size
    ));
    for page in 1..=demo.pages {
        line(&format!("Page {}:", page));
        let first = first_on_page(demo.page_size, page)?;
        print_each(books.find_page(demo.page_size, page).await?, |i, b: Book| {
            numbered_item(
                first.saturating_add(i as u64),
                &format!("{} by {}", b.title, b.author),
            )
        })
        .await?;
        if page < demo.pages {
            output::newline();
        }
    }

    Ok(())
}

// =============================================================================
// Aggregation pipelines
// =============================================================================

async fn aggregation(books: &BookQueryFacade) -> MongoResult<()> {
    output::header("🔍 AGGREGATION PIPELINES");

    output::section("1. Average price by genre:");
    print_each(books.average_price_by_genre().await?, |_, stats| {
        list_item(&format!("{}:", stats.genre));
        detail(&format!("Average: {}", price(stats.avg_price)));
        detail(&format!("Books: {}", stats.count));
        detail(&format!(
            "Range: {} - {}",
            price(stats.min_price),
            price(stats.max_price)
        ));
    })
    .await?;

    output::section("2. Authors ranked by number of books:");
    print_each(books.books_by_author_ranked().await?, |_, ranking| {
        list_item(&format!("{}: {} book(s)", ranking.author, ranking.count));
        detail(&format!("Total pages: {}", ranking.total_pages));
        detail(&format!("Avg price: {}", price(ranking.avg_price)));
        for title in &ranking.titles {
            detail(&format!("\"{}\"", title));
        }
    })
    .await?;

    output::section("3. Books grouped by publication decade:");
    print_each(books.books_by_decade().await?, |_, group| {
        list_item(&format!(
            "{}: {} book(s) - Avg price: {}",
            group.decade,
            group.count,
            price(group.avg_price)
        ));
        for book in &group.books {
            detail(&format!("{} ({}) by {}", book.title, book.year, book.author));
        }
    })
    .await?;

    Ok(())
}

// =============================================================================
// Indexing
// =============================================================================

async fn indexing(books: &BookQueryFacade, demo: &DemoConfig) -> MongoResult<()> {
    output::header("🔍 INDEXING");

    output::section("1. Creating index on 'title' field:");
    report_index(books.ensure_index(&IndexSpec::ascending(BookField::Title)).await?);

    output::section("2. Creating compound index on 'author' and 'published_year':");
    let compound = IndexSpec::new()
        .key(BookField::Author, SortDirection::Ascending)
        .key(BookField::PublishedYear, SortDirection::Descending);
    report_index(books.ensure_index(&compound).await?);

    output::section(&format!(
        "3. Current indexes on {} collection:",
        books.collection_name()
    ));
    for index in books.list_indexes().await? {
        list_item(&format!("{}: {}", index.name, index.keys_json()));
    }

    output::section("4. Performance analysis with explain():");

    output::newline();
    line("🔍 Title search performance:");
    let report = books.explain(filter::by_title(&demo.update_title)).await?;
    report_explain(&report, "Index used");

    output::newline();
    line("🔍 Compound index performance test:");
    let report = books
        .explain(filter::by_author_since(&demo.explain_author, demo.explain_since))
        .await?;
    report_explain(&report, "Index used");

    output::newline();
    line(&format!("🔍 Query without index ({} field):", BookField::Genre));
    let report = books.explain(filter::by_genre(&demo.genre)).await?;
    report_explain(&report, "Scan type");

    Ok(())
}

/// 1-based position of the first book on `page`.
fn first_on_page(page_size: u64, page: u64) -> MongoResult<u64> {
    let skip = page_options(page_size, page)?.skip.unwrap_or(0);
    Ok(skip.saturating_add(1))
}

fn report_index(outcome: IndexOutcome) {
    match &outcome {
        IndexOutcome::Created(name) => output::success(&format!("Index created: {}", name)),
        IndexOutcome::Conflict { .. } => output::warn(&outcome.to_string()),
    }
}

fn report_explain(report: &ExplainReport, plan_label: &str) {
    list_item(&format!("Execution time: {}ms", report.execution_time_ms));
    list_item(&format!("Documents examined: {}", report.docs_examined));
    list_item(&format!("Documents returned: {}", report.docs_returned));
    let plan = if report.is_collection_scan() {
        format!("{} (no index)", report.stage)
    } else {
        report.stage_or_index_used().to_string()
    };
    list_item(&format!("{}: {}", plan_label, plan));
}

// =============================================================================
// Statistics
// =============================================================================

async fn statistics(books: &BookQueryFacade) -> MongoResult<()> {
    output::header("🔍 ADDITIONAL USEFUL QUERIES & STATISTICS");

    output::section("1. Collection overview:");
    match books.collection_summary().await? {
        Some(summary) => {
            line("📊 Database Statistics:");
            list_item(&format!("Total books: {}", summary.total_books));
            list_item(&format!("Average price: {}", price(summary.avg_price)));
            list_item(&format!("Average pages: {} pages", summary.avg_pages.round()));
            list_item(&format!("Total pages: {} pages", thousands(summary.total_pages)));
            list_item(&format!(
                "Total collection value: {}",
                price(summary.total_value)
            ));
            list_item(&format!("Books in stock: {}", summary.in_stock_count));
            list_item(&format!("Books out of stock: {}", summary.out_of_stock_count));
            list_item(&format!(
                "Publication range: {} - {}",
                summary.oldest_year, summary.newest_year
            ));
        }
        None => output::dim("   (collection is empty)"),
    }

    output::section("2. Price extremes:");
    match books.price_extremes().await? {
        Some(extremes) => {
            let (high, low) = (&extremes.most_expensive, &extremes.cheapest);
            line(&format!(
                "💰 Most expensive: \"{}\" by {} - {}",
                high.title,
                high.author,
                price(high.price)
            ));
            line(&format!(
                "💵 Cheapest: \"{}\" by {} - {}",
                low.title,
                low.author,
                price(low.price)
            ));
        }
        None => output::dim("   (collection is empty)"),
    }

    output::section("3. Book length extremes:");
    match books.length_extremes().await? {
        Some(extremes) => {
            line(&format!(
                "📖 Longest: \"{}\" - {} pages",
                extremes.longest.title, extremes.longest.pages
            ));
            line(&format!(
                "📄 Shortest: \"{}\" - {} pages",
                extremes.shortest.title, extremes.shortest.pages
            ));
        }
        None => output::dim("   (collection is empty)"),
    }

    output::section("4. Stock status breakdown:");
    print_each(books.stock_breakdown().await?, |_, status| {
        let marker = if status.in_stock { "📗" } else { "📕" };
        line(&format!("{} {}: {} books", marker, status.label(), status.count));
    })
    .await?;

    output::section("5. Genre analysis:");
    print_each(books.genre_analysis().await?, |_, genre| {
        line(&format!("📚 {}: {} book(s)", genre.genre, genre.count));
        line(&format!(
            "    Avg price: {}, Avg pages: {}",
            price(genre.avg_price),
            genre.avg_pages.round()
        ));
    })
    .await?;

    Ok(())
}
