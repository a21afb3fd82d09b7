//! proptree CLI entry point
//!
//! Parses arguments, runs the selected command and turns failures into a
//! readable message with an exit status of 1.
//!
//! Commands:
//! - `tree` - Build and print a keyed property tree
//! - `extract` - Print the values at one depth of a nested JSON mapping
//! - `properties` - Summarise GeoJSON annotation properties

use anyhow::Result;
use clap::Parser;
use proptree_cli::cli;
use proptree_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
