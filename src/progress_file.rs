//! Star ratings on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::ProgressBook;

#[derive(Debug, Error)]
pub enum ProgressFileError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid progress JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ProgressFileError + '_ {
    move |source| ProgressFileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load a progress book. A missing file is an empty book.
///
/// Ratings above the star cap are clamped.
pub fn load(path: impl AsRef<Path>) -> Result<ProgressBook, ProgressFileError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("no progress file at {}, starting fresh", path.display());
            return Ok(ProgressBook::new());
        }
        Err(e) => return Err(io_error(path)(e)),
    };

    let raw: ProgressBook = serde_json::from_str(&text)?;
    let mut book = ProgressBook::new();
    for (id, rating) in raw.iter() {
        book.set_rating(id, rating);
    }
    Ok(book)
}

/// Write `book` next to `path` and move it into place.
pub fn save(path: impl AsRef<Path>, book: &ProgressBook) -> Result<(), ProgressFileError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(book)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;
    log::debug!("saved {} ratings to {}", book.len(), path.display());
    Ok(())
}
