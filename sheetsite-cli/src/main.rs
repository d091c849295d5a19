//! # sheetsite CLI
//!
//! Command-line interface for the sheetsite static site generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetsite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "sheetsite.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the sheet and regenerate the site
    Build {
        /// Read the feed payload from a file instead of the configured endpoint
        #[arg(long)]
        feed_file: Option<PathBuf>,
    },

    /// Print the slug derived from each title
    Slug {
        /// Titles to convert
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = match cli.command {
        Commands::Build { feed_file } => {
            commands::build_site(&cli.config, feed_file.as_deref()).await
        }
        Commands::Slug { titles } => {
            commands::print_slugs(&titles);
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
