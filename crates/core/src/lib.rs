//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of Atomiks and the screen state machine
//! around them. It has **no dependency** on the terminal, which makes it:
//!
//! - **Deterministic**: time is always passed in as an `Instant`, and the
//!   explosion order comes from a seeded [`SimpleRng`]
//! - **Testable**: levels are built from ASCII rows with [`Grid::from_ascii`]
//!   and storage is swappable through the [`Storage`] trait
//! - **Portable**: the same controller drives the terminal front-end and
//!   headless tests
//!
//! # Module Structure
//!
//! - [`grid`]: 64x64 cell store with a 16x16 playable region
//! - [`level`]: level records and the 546-byte `levNNNN.dat` format
//! - [`progress`]: unlocked level and per-level high scores
//! - [`movement`]: cursor hops and greedy atom slides
//! - [`win`]: solution matching
//! - [`session`]: one attempt at one level (score, clock, pause)
//! - [`progression`]: the screen state machine
//! - [`slideshow`]: intro pages and the exit fade
//! - [`editor`]: the level editor model
//! - [`config`]: environment and command-line configuration
//!
//! # Game Rules
//!
//! - The player moves a cursor over the field and picks up atoms.
//! - A carried atom slides in a straight line until it hits anything that
//!   is not free floor. Every slide costs 5 points.
//! - A level is solved when the solution molecule appears anywhere in the
//!   field. Walls in the solution match anything; atom variants are ignored.
//! - Time left on the clock is converted into bonus points.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use atomiks_core::{Controller, MemoryStorage, Progress, Rules, SimpleRng};
//! use atomiks_core::types::{Command, Screen};
//!
//! let now = Instant::now();
//! let mut game = Controller::new(MemoryStorage::new(), Progress::new(), Rules::default(), SimpleRng::new(1), now);
//! assert_eq!(game.screen(), Screen::Intro);
//!
//! game.handle(Command::Esc, now);
//! game.update(now);
//! game.apply_pending(now);
//! assert_eq!(game.screen(), Screen::Exit);
//! ```
//!
//! # Timing
//!
//! The front-end runs a fixed 16ms tick. Cursor hops and slides advance
//! 8 pixels per tick; the level clock and explosion frames are wall-clock
//! based and read the `Instant` handed to [`Controller::update`].

pub mod config;
pub mod editor;
pub mod grid;
pub mod level;
pub mod movement;
pub mod progress;
pub mod progression;
pub mod rng;
pub mod session;
pub mod slideshow;
pub mod snapshot;
pub mod storage;
pub mod win;

pub use atomiks_types as types;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigArgs, Rules};
pub use editor::{EditorView, LevelEditor};
pub use grid::Grid;
pub use level::{level_file_name, Level, LevelStore, LEVEL_FILE_LEN};
pub use movement::{slide_distance, Cursor, LooseTile, MoveStart, Mover, Settled};
pub use progress::{Progress, ProgressStore, PROGRESS_FILE_LEN};
pub use progression::Controller;
pub use rng::SimpleRng;
pub use session::GameSession;
pub use slideshow::{Slide, SlideKind, Slideshow};
pub use snapshot::{CursorSnapshot, ExplosionSnapshot, LooseSnapshot, PackedGrid, Snapshot};
pub use storage::{DiskStorage, MemoryStorage, Storage};
pub use win::{find_match, is_won};
