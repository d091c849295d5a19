//! Build command implementation.

use anyhow::{Context, Result};
use sheetsite_core::{Config, FeedSource, FileSource, HttpSource};
use sheetsite_render::AskamaRenderer;
use std::path::Path;

/// Load config, pick the feed source and run a full build
pub async fn build_site(config_path: &Path, feed_file: Option<&Path>) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;

    let source: Box<dyn FeedSource> = match feed_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(config.feed_endpoint.clone())),
    };

    tracing::info!("Building site: {}", config.site.title);

    let report = sheetsite_core::build(&config, source.as_ref(), &AskamaRenderer)
        .await
        .context("Failed to build site")?;

    tracing::info!("✓ Built {} pages", report.rows);
    tracing::info!("✓ {} short links", report.redirects);
    tracing::info!("✓ Output written to {:?}", report.output_dir);

    Ok(())
}
