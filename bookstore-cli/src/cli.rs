//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

/// Environment variable holding the MongoDB connection string.
pub const URI_ENV: &str = "BOOKSTORE_MONGODB_URI";

/// Bookstore - MongoDB query walkthrough
#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(version)]
#[command(
    about = "Bookstore - a guided tour of MongoDB queries, aggregations and indexes",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Connection settings shared by every command
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the query walkthrough against the books collection
    Demo(DemoArgs),

    /// Load books into the collection
    Seed(SeedArgs),

    /// Write a default bookstore.toml
    Init(InitArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Connection
// =============================================================================

/// Global connection flags; each overrides the matching config file value
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// MongoDB connection string
    #[arg(long, global = true, env = URI_ENV)]
    pub uri: Option<String>,

    /// Database name
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Collection name
    #[arg(long, global = true)]
    pub collection: Option<String>,
}

// =============================================================================
// Demo Command
// =============================================================================

/// Arguments for the `demo` command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Which part of the walkthrough to run
    #[arg(short, long, value_enum, default_value_t = Section::All)]
    pub section: Section,
}

/// Walkthrough sections, in the order `all` runs them
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    All,
    Crud,
    Queries,
    Aggregation,
    Indexing,
    Stats,
}

impl Section {
    /// Whether running `self` includes `other`.
    pub fn includes(&self, other: Section) -> bool {
        *self == Section::All || *self == other
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::All => write!(f, "all"),
            Section::Crud => write!(f, "crud"),
            Section::Queries => write!(f, "queries"),
            Section::Aggregation => write!(f, "aggregation"),
            Section::Indexing => write!(f, "indexing"),
            Section::Stats => write!(f, "stats"),
        }
    }
}

// =============================================================================
// Seed Command
// =============================================================================

/// Arguments for the `seed` command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// JSON file holding an array of books (defaults to the built-in catalogue)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Drop the collection before inserting
    #[arg(long)]
    pub drop: bool,

    /// Skip the confirmation prompt for --drop
    #[arg(short, long)]
    pub yes: bool,
}

// =============================================================================
// Init Command
// =============================================================================

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_demo_section_defaults_to_all() {
        let cli = Cli::try_parse_from(["bookstore", "demo"]).unwrap();
        match cli.command {
            Command::Demo(args) => assert_eq!(args.section, Section::All),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.connection.config, PathBuf::from(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bookstore",
            "demo",
            "--section",
            "indexing",
            "--database",
            "scratch",
            "--collection",
            "novels",
        ])
        .unwrap();
        assert_eq!(cli.connection.database.as_deref(), Some("scratch"));
        assert_eq!(cli.connection.collection.as_deref(), Some("novels"));
        match cli.command {
            Command::Demo(args) => assert_eq!(args.section, Section::Indexing),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_flags() {
        let cli =
            Cli::try_parse_from(["bookstore", "seed", "--file", "books.json", "--drop", "-y"])
                .unwrap();
        match cli.command {
            Command::Seed(args) => {
                assert_eq!(args.file, Some(PathBuf::from("books.json")));
                assert!(args.drop);
                assert!(args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Cli::try_parse_from(["bookstore", "demo", "--section", "sharding"]).is_err());
    }

    #[test]
    fn test_section_includes() {
        assert!(Section::All.includes(Section::Stats));
        assert!(Section::Crud.includes(Section::Crud));
        assert!(!Section::Crud.includes(Section::Queries));
    }
}
