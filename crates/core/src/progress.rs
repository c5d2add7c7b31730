//! Player progress: highest unlocked level and per-level high scores.
//!
//! File layout: 1 byte max unlocked level, then 30 big-endian u16 scores.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::types::LEVEL_COUNT;

/// Exact size of the progress file.
pub const PROGRESS_FILE_LEN: usize = 1 + 2 * LEVEL_COUNT as usize;

/// Progress file name inside the preference directory.
pub const PROGRESS_FILE_NAME: &str = "Atomiks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    max_auth_level: u8,
    hiscores: [u16; LEVEL_COUNT as usize],
}

impl Progress {
    /// A fresh profile: level 1 unlocked, no scores.
    pub fn new() -> Self {
        Self {
            max_auth_level: 1,
            hiscores: [0; LEVEL_COUNT as usize],
        }
    }

    pub fn max_auth_level(&self) -> u8 {
        self.max_auth_level
    }

    /// Unlock the next level if `completed` is the current frontier.
    /// Returns whether anything changed.
    pub fn complete_level(&mut self, completed: u8) -> bool {
        if completed == self.max_auth_level && self.max_auth_level < LEVEL_COUNT {
            self.max_auth_level += 1;
            return true;
        }
        false
    }

    /// High score for a 1-based level (0 for out-of-range levels).
    pub fn hiscore(&self, level: u8) -> u32 {
        Self::slot(level)
            .map(|i| self.hiscores[i] as u32)
            .unwrap_or(0)
    }

    /// Record `score` if it is at least the stored one. Scores above
    /// `u16::MAX` are clamped to fit the file format.
    pub fn record_hiscore(&mut self, level: u8, score: u32) -> bool {
        let Some(i) = Self::slot(level) else {
            return false;
        };
        let score = score.min(u16::MAX as u32) as u16;
        if score >= self.hiscores[i] {
            self.hiscores[i] = score;
            return true;
        }
        false
    }

    fn slot(level: u8) -> Option<usize> {
        if level == 0 || level > LEVEL_COUNT {
            return None;
        }
        Some(level as usize - 1)
    }

    /// Decode; anything but the exact length is rejected. A stored level
    /// of 0 is clamped to 1.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PROGRESS_FILE_LEN {
            return None;
        }
        let mut progress = Self::new();
        progress.max_auth_level = bytes[0].max(1);
        for (score, pair) in progress
            .hiscores
            .iter_mut()
            .zip(bytes[1..].chunks_exact(2))
        {
            *score = u16::from_be_bytes([pair[0], pair[1]]);
        }
        Some(progress)
    }

    pub fn encode(&self) -> [u8; PROGRESS_FILE_LEN] {
        let mut out = [0u8; PROGRESS_FILE_LEN];
        out[0] = self.max_auth_level;
        for (i, score) in self.hiscores.iter().enumerate() {
            out[1 + 2 * i..3 + 2 * i].copy_from_slice(&score.to_be_bytes());
        }
        out
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// The progress file in the preference directory.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(pref_dir: impl AsRef<Path>) -> Self {
        Self {
            path: pref_dir.as_ref().join(PROGRESS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load progress; a missing or malformed file is a fresh profile.
    pub fn load(&self) -> Progress {
        match std::fs::read(&self.path) {
            Ok(bytes) => Progress::decode(&bytes).unwrap_or_else(|| {
                warn!(
                    "{} has {} bytes, expected {}: starting fresh profile",
                    self.path.display(),
                    bytes.len(),
                    PROGRESS_FILE_LEN
                );
                Progress::new()
            }),
            Err(err) => {
                debug!("no progress at {} ({}): fresh profile", self.path.display(), err);
                Progress::new()
            }
        }
    }

    /// Write progress; reports the flush error first, then the close error.
    pub fn save(&self, progress: &Progress) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        let mut w = BufWriter::new(file);
        w.write_all(&progress.encode())
            .and_then(|_| w.flush())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        let file = w
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to close {}", self.path.display()))?;
        info!("saved progress to {}", self.path.display());
        Ok(())
    }
}
