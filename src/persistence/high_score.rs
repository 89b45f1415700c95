use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Reads and writes the high score file
///
/// The file holds the decimal text of a single non-negative integer. Anything
/// else (missing file, unreadable file, junk content) reads back as zero.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score, falling back to 0
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring malformed high score file {:?}", self.path);
                0
            }),
            Err(err) => {
                log::debug!("No high score loaded from {:?}: {}", self.path, err);
                0
            }
        }
    }

    /// Overwrite the stored high score
    ///
    /// Callers are expected to report the error and carry on.
    pub fn save(&self, score: u32) -> Result<()> {
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))
    }
}

/// Only plain ASCII digits are accepted, so signs and whitespace inside the
/// number are rejected rather than interpreted.
fn parse_score(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}
