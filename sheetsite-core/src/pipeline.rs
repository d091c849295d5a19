//! End-to-end build: fetch, parse, generate, write.

use crate::{
    builder::{PageRenderer, RenderError, SiteBuilder},
    config::Config,
    feed::{parse_feed, MalformedFeedError},
    fetch::{FeedSource, RetrievalError},
    writer::{write_artifacts, WriteError},
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to retrieve feed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Malformed feed: {0}")]
    MalformedFeed(#[from] MalformedFeedError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

/// What a successful build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub rows: usize,
    pub files: usize,
    pub redirects: usize,
    pub output_dir: PathBuf,
}

/// Run one full build.
///
/// The output directory is only touched once the feed has been fetched,
/// parsed and rendered, so an unreachable or malformed feed writes nothing.
pub async fn build<R>(
    config: &Config,
    source: &dyn FeedSource,
    renderer: &R,
) -> Result<BuildReport, BuildError>
where
    R: PageRenderer + ?Sized,
{
    tracing::info!("Fetching feed from {}", source.describe());
    let payload = source.fetch().await?;

    let table = parse_feed(&payload)?;
    let rows = table.normalize();
    tracing::info!("Processed {} rows from feed", rows.len());

    let artifacts = SiteBuilder::new(config, renderer).build(&rows)?;

    let output_dir = config.output_dir();
    let files = write_artifacts(&artifacts, &output_dir)?;

    Ok(BuildReport {
        rows: rows.len(),
        files,
        redirects: artifacts.redirects().count(),
        output_dir,
    })
}
