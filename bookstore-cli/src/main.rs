//! Bookstore CLI - MongoDB query walkthrough.

use clap::Parser;

use bookstore_cli::cli::{Cli, Command};
use bookstore_cli::commands;
use bookstore_cli::config::Config;
use bookstore_cli::error::CliResult;
use bookstore_cli::logging;
use bookstore_cli::output;

#[tokio::main]
async fn main() {
    // Run the CLI and handle errors
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let Cli { connection, command } = Cli::parse();
    logging::init();

    match command {
        Command::Demo(args) => commands::demo::run(args, Config::resolve(&connection)?).await,
        Command::Seed(args) => commands::seed::run(args, Config::resolve(&connection)?).await,
        Command::Init(args) => commands::init::run(args, &connection.config).await,
        Command::Version => commands::version::run().await,
    }
}
