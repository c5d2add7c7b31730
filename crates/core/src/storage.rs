//! Storage seam between the controller and the disk.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::level::{Level, LevelStore};
use crate::progress::{Progress, ProgressStore};

pub trait Storage {
    /// Load a level; absent levels are blank, never an error.
    fn load_level(&self, level: u8) -> Level;

    fn save_progress(&mut self, progress: &Progress) -> Result<()>;
}

/// Level files under `<assets>/lev`, progress under the preference dir.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    levels: LevelStore,
    progress: ProgressStore,
}

impl DiskStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            levels: LevelStore::new(config.levels_dir()),
            progress: ProgressStore::new(&config.pref_dir),
        }
    }

    pub fn load_progress(&self) -> Progress {
        self.progress.load()
    }

    pub fn levels(&self) -> &LevelStore {
        &self.levels
    }
}

impl Storage for DiskStorage {
    fn load_level(&self, level: u8) -> Level {
        self.levels.load(level)
    }

    fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        self.progress.save(progress)
    }
}

/// In-memory storage for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    levels: HashMap<u8, Level>,
    saved: Vec<Progress>,
    fail_saves: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, number: u8, level: Level) -> Self {
        self.levels.insert(number, level);
        self
    }

    /// Make every save fail, as a full disk would.
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Every progress record saved so far, oldest first.
    pub fn saved(&self) -> &[Progress] {
        &self.saved
    }
}

impl Storage for MemoryStorage {
    fn load_level(&self, level: u8) -> Level {
        self.levels.get(&level).cloned().unwrap_or_default()
    }

    fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        if self.fail_saves {
            bail!("no space left on device");
        }
        self.saved.push(progress.clone());
        Ok(())
    }
}
