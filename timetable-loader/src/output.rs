//! Writing the generated line dataset.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::domain::TransitLine;

/// Errors from writing the dataset.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk format of the dataset.
#[derive(Serialize)]
struct Dataset<'a> {
    generated_at: String,
    lines: &'a [TransitLine],
}

/// Write `lines` to `path` as pretty-printed JSON.
///
/// Any previous dataset at `path` is replaced. Parent directories are
/// created if needed.
pub fn write_lines(
    path: &Path,
    lines: &[TransitLine],
    generated_at: NaiveDateTime,
) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let dataset = Dataset {
        generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        lines,
    };
    let json = serde_json::to_string_pretty(&dataset)?;
    std::fs::write(path, json)?;

    info!(path = %path.display(), lines = lines.len(), "wrote line dataset");
    Ok(())
}
