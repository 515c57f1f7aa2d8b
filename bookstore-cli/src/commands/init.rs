//! `bookstore init` command - Write a default configuration file.

use std::path::Path;

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, confirm, success};

/// Run the init command
pub async fn run(args: InitArgs, path: &Path) -> CliResult<()> {
    output::header("Initialize configuration");

    if path.exists() {
        output::warn(&format!("{} already exists.", path.display()));

        if !args.force && !confirm("Overwrite it with defaults?") {
            return Ok(());
        }
    }

    Config::default().save(path)?;
    success(&format!("Wrote {}", path.display()));

    output::newline();
    output::dim("Edit [database] to point at your server, then run `bookstore seed`.");

    Ok(())
}
