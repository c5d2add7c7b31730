//! Runtime configuration.
//!
//! Both binaries flatten [`ConfigArgs`] into their `clap` parser. Every
//! option can also come from an `ATOMIKS_*` environment variable; flags on
//! the command line win:
//!
//! - `--assets <dir>` / `ATOMIKS_ASSETS`: asset directory (levels in `lev/`)
//! - `--pref <dir>` / `ATOMIKS_PREF`: preference directory (progress, log)
//! - `--fullscreen` / `ATOMIKS_FULLSCREEN`
//! - `--no-sound` / `ATOMIKS_SOUND=0`: sound cues (on by default)
//! - `--no-lose` / `ATOMIKS_NO_LOSE`: no timeout, no slide penalty
//! - `--unlocked` / `ATOMIKS_UNLOCKED`: every level selectable

use std::env;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;

/// Gameplay switches the controller needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    pub no_lose: bool,
    pub unlocked: bool,
}

/// Command-line and environment options shared by the game and the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct ConfigArgs {
    /// Asset directory; levels are read from its `lev/` subdirectory.
    #[arg(long = "assets", env = "ATOMIKS_ASSETS", value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Preference directory holding progress and the log.
    #[arg(long = "pref", env = "ATOMIKS_PREF", value_name = "DIR")]
    pub pref: Option<PathBuf>,

    /// Ask for a full-screen window.
    #[arg(long, env = "ATOMIKS_FULLSCREEN", value_parser = BoolishValueParser::new())]
    pub fullscreen: bool,

    /// Turn the sound cues off.
    #[arg(long = "no-sound")]
    pub no_sound: bool,

    #[arg(
        long = "sound",
        env = "ATOMIKS_SOUND",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        hide = true
    )]
    pub sound: Option<bool>,

    /// No timeout and no slide penalty.
    #[arg(long = "no-lose", env = "ATOMIKS_NO_LOSE", value_parser = BoolishValueParser::new())]
    pub no_lose: bool,

    /// Make every level selectable.
    #[arg(long, env = "ATOMIKS_UNLOCKED", value_parser = BoolishValueParser::new())]
    pub unlocked: bool,
}

impl ConfigArgs {
    /// Fill in defaults; the preference dir falls back through
    /// `$XDG_DATA_HOME` and `$HOME`.
    pub fn resolve(self) -> Config {
        self.resolve_with(|key| env::var(key).ok())
    }

    pub fn resolve_with(self, lookup: impl Fn(&str) -> Option<String>) -> Config {
        let pref_dir = self
            .pref
            .or_else(|| lookup("XDG_DATA_HOME").map(|d| PathBuf::from(d).join("atomiks")))
            .or_else(|| lookup("HOME").map(|h| PathBuf::from(h).join(".local/share/atomiks")))
            .unwrap_or_else(|| PathBuf::from(".atomiks"));

        Config {
            assets_dir: self.assets.unwrap_or_else(|| PathBuf::from("assets")),
            pref_dir,
            fullscreen: self.fullscreen,
            sound: !self.no_sound && self.sound.unwrap_or(true),
            no_lose: self.no_lose,
            unlocked: self.unlocked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub pref_dir: PathBuf,
    pub fullscreen: bool,
    pub sound: bool,
    pub no_lose: bool,
    pub unlocked: bool,
}

impl Config {
    pub fn levels_dir(&self) -> PathBuf {
        self.assets_dir.join("lev")
    }

    pub fn log_path(&self) -> PathBuf {
        self.pref_dir.join("atomiks.log")
    }

    pub fn rules(&self) -> Rules {
        Rules {
            no_lose: self.no_lose,
            unlocked: self.unlocked,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigArgs::default().resolve_with(|_| None)
    }
}
