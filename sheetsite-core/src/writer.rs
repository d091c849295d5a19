//! Materializes an [`ArtifactSet`] on disk.

use crate::models::ArtifactSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("failed to {action} {path:?}: {source}")]
pub struct WriteError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

fn io_context(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> WriteError {
    let path = path.to_path_buf();
    move |source| WriteError {
        action,
        path,
        source,
    }
}

/// Wipe `output_dir` and write every artifact into it.
///
/// Returns the number of files written. A failure part way through leaves
/// whatever was already written in place.
pub fn write_artifacts(artifacts: &ArtifactSet, output_dir: &Path) -> Result<usize, WriteError> {
    reset_dir(output_dir)?;

    let mut written = 0;
    for (rel, contents) in artifacts.files() {
        write_file(&output_dir.join(rel), contents)?;
        written += 1;
    }

    write_file(
        &output_dir.join(ArtifactSet::REDIRECTS_FILE),
        &artifacts.redirects_file(),
    )?;
    written += 1;

    tracing::info!("Wrote {} files to {:?}", written, output_dir);
    Ok(written)
}

/// Remove the directory if present, then recreate it empty
pub fn reset_dir(dir: &Path) -> Result<(), WriteError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(io_context("remove", dir))?;
    }
    fs::create_dir_all(dir).map_err(io_context("create", dir))
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_context("create", parent))?;
    }
    fs::write(path, contents).map_err(io_context("write", path))
}
