//! Artifact output for the compiled configuration

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// File name of the compiled artifact, resolved against the working directory
pub const ARTIFACT_NAME: &str = "bunfig.toml";

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error while staging the artifact
    #[error("Failed to write bunfig.toml: {0}")]
    Io(#[from] std::io::Error),
    /// The staged file could not replace the destination
    #[error("Failed to replace bunfig.toml: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Write the compiled configuration to `bunfig.toml` inside `dir`.
///
/// The full text is staged in a temporary file in the same directory and
/// then renamed over the destination, so an interrupted run leaves either
/// no artifact or the previous complete one, never a half-written file.
/// Any existing artifact is replaced without confirmation.
///
/// Returns the path of the written artifact.
pub fn write_artifact(dir: &Path, contents: &str) -> Result<PathBuf, OutputError> {
    let path = dir.join(ARTIFACT_NAME);

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.persist(&path)?;

    Ok(path)
}
