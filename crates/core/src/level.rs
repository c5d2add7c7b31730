//! Level records and the `levNNNN.dat` file format.
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 256 | Field grid, row-major 16x16 |
//! | 256 | 256 | Solution grid, row-major 16x16 |
//! | 512 | 2 | Duration in seconds, big-endian |
//! | 514 | 30 | Description, 2x15 ASCII bytes (0 = unused) |
//! | 544 | 1 | Cursor type (1 or 2) |
//! | 545 | 1 | Background id (0..2) |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::grid::Grid;
use crate::types::{DESC_LEN, DESC_LINES, PLAY_SIZE};

const GRID_BYTES: usize = PLAY_SIZE * PLAY_SIZE;
const DURATION_OFFSET: usize = 2 * GRID_BYTES;
const DESC_OFFSET: usize = DURATION_OFFSET + 2;
const CURSOR_OFFSET: usize = DESC_OFFSET + DESC_LINES * DESC_LEN;
const BACKGROUND_OFFSET: usize = CURSOR_OFFSET + 1;

/// Exact size of a level file.
pub const LEVEL_FILE_LEN: usize = BACKGROUND_OFFSET + 1;

/// File name for a level number (`lev0007.dat`).
pub fn level_file_name(level: u8) -> String {
    format!("lev{:04}.dat", level)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub field: Grid,
    pub solution: Grid,
    pub duration_secs: u16,
    pub desc: [[u8; DESC_LEN]; DESC_LINES],
    pub cursor_type: u8,
    pub background: u8,
}

impl Level {
    /// A blank level: empty grids, no time limit text.
    pub fn blank() -> Self {
        Self {
            field: Grid::new(),
            solution: Grid::new(),
            duration_secs: 0,
            desc: [[0; DESC_LEN]; DESC_LINES],
            cursor_type: 1,
            background: 0,
        }
    }

    /// Decode a level file. Anything but the exact length is rejected.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != LEVEL_FILE_LEN {
            return None;
        }

        let mut level = Self::blank();
        level.field.read_play_bytes(&bytes[..GRID_BYTES]);
        level.solution.read_play_bytes(&bytes[GRID_BYTES..DURATION_OFFSET]);
        level.duration_secs =
            u16::from_be_bytes([bytes[DURATION_OFFSET], bytes[DURATION_OFFSET + 1]]);
        for (line, chunk) in level
            .desc
            .iter_mut()
            .zip(bytes[DESC_OFFSET..CURSOR_OFFSET].chunks_exact(DESC_LEN))
        {
            line.copy_from_slice(chunk);
        }
        level.cursor_type = bytes[CURSOR_OFFSET];
        level.background = bytes[BACKGROUND_OFFSET];
        Some(level)
    }

    pub fn encode(&self) -> [u8; LEVEL_FILE_LEN] {
        let mut out = [0u8; LEVEL_FILE_LEN];
        self.field.write_play_bytes(&mut out[..GRID_BYTES]);
        self.solution
            .write_play_bytes(&mut out[GRID_BYTES..DURATION_OFFSET]);
        out[DURATION_OFFSET..DESC_OFFSET].copy_from_slice(&self.duration_secs.to_be_bytes());
        for (i, line) in self.desc.iter().enumerate() {
            let start = DESC_OFFSET + i * DESC_LEN;
            out[start..start + DESC_LEN].copy_from_slice(line);
        }
        out[CURSOR_OFFSET] = self.cursor_type;
        out[BACKGROUND_OFFSET] = self.background;
        out
    }

    /// Where the cursor starts: the first free or atom cell in row-major
    /// order, or the origin if there is none.
    pub fn start_cell(&self) -> (usize, usize) {
        for y in 0..PLAY_SIZE {
            for x in 0..PLAY_SIZE {
                let cell = self.field.at(x, y);
                if cell.is_free() || cell.is_atom() {
                    return (x, y);
                }
            }
        }
        (0, 0)
    }

    /// Description line as text, stopping at the first unused slot.
    pub fn desc_line(&self, line: usize) -> String {
        self.desc[line]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::blank()
    }
}

/// Level files in one directory.
#[derive(Debug, Clone)]
pub struct LevelStore {
    dir: PathBuf,
}

impl LevelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, level: u8) -> PathBuf {
        self.dir.join(level_file_name(level))
    }

    /// Load a level; a missing or malformed file yields a blank level.
    pub fn load(&self, level: u8) -> Level {
        let path = self.path(level);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("level {} unavailable ({}): using blank level", level, err);
                return Level::blank();
            }
        };

        match Level::decode(&bytes) {
            Some(decoded) => {
                info!("loaded level {} from {}", level, path.display());
                decoded
            }
            None => {
                warn!(
                    "{} has {} bytes, expected {}: using blank level",
                    path.display(),
                    bytes.len(),
                    LEVEL_FILE_LEN
                );
                Level::blank()
            }
        }
    }

    /// Create/truncate the level file and write it. Not atomic.
    pub fn save(&self, level: u8, data: &Level) -> Result<()> {
        let path = self.path(level);
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut w = BufWriter::new(file);
        w.write_all(&data.encode())
            .with_context(|| format!("failed to write {}", path.display()))?;
        let file = w
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("failed to flush {}", path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to close {}", path.display()))?;
        info!("saved level {} to {}", level, path.display());
        Ok(())
    }
}
