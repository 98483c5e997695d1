//! File-backed high score.
//!
//! The file is plain text: a single decimal integer, optionally followed by a
//! newline. Saving truncates and rewrites it.

use std::io::ErrorKind;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Errors from high-score file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed high score {content:?}: {source}")]
    Parse {
        content: String,
        #[source]
        source: ParseIntError,
    },
}

/// Reads and writes the high-score file at a fixed path.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read. A missing file is a record of zero; anything else that
    /// goes wrong is an error.
    pub fn try_load(&self) -> Result<u32, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        content
            .trim()
            .parse::<u32>()
            .map_err(|source| StoreError::Parse { content, source })
    }

    /// Tolerant read for startup: failures are logged and treated as zero.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                tracing::debug!(path = %self.path.display(), score, "high score loaded");
                score
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "high score unreadable, using 0"
                );
                0
            }
        }
    }

    /// Write `max(current, previous)` and return the value written.
    pub fn save(&self, current: u32, previous: u32) -> Result<u32, StoreError> {
        let best = current.max(previous);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{best}\n"))?;
        tracing::info!(path = %self.path.display(), score = best, "high score saved");
        Ok(best)
    }

    /// Overwrite the record with zero.
    pub fn reset(&self) -> Result<(), StoreError> {
        std::fs::write(&self.path, "0\n")?;
        tracing::info!(path = %self.path.display(), "high score reset");
        Ok(())
    }
}
