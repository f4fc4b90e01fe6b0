//! Export helpers for CSV trajectories and JSON run summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub mod summary;
pub mod trajectory;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}
