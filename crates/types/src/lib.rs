//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be
//! used by the game logic, the terminal renderer and the level editor alike.
//!
//! # Grid Dimensions
//!
//! - **Storage**: 64x64 cells per grid (indexed 0-63)
//! - **Playable region**: the top-left 16x16 cells; level files store only
//!   this region and slides never leave it
//!
//! # Cell Encoding
//!
//! On disk each cell is one byte: a 2-bit type tag in the high bits and a
//! 6-bit sprite index in the low bits.
//!
//! | Bits        | Meaning                |
//! |-------------|------------------------|
//! | `00xx_xxxx` | empty (no tile at all) |
//! | `10xx_xxxx` | free floor             |
//! | `01ii_iiii` | atom, variant `i`      |
//! | `11ii_iiii` | wall, variant `i`      |
//!
//! In memory cells are the tagged [`Cell`] enum; [`Cell::pack`] and
//! [`Cell::unpack`] are the only conversions between the two forms.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed update interval (~60 FPS) |
//! | `EXPLOSION_FRAME_MS` | 40 | One frame of the win explosion |
//! | `TITLE_SLIDE_MS` | 4000 | Title slide auto-advance |
//! | `EXIT_FADE_STEP_MS` | 30 | One step of the exit fade |
//!
//! # Examples
//!
//! ```
//! use atomiks_types::{Cell, Direction};
//!
//! let atom = Cell::Atom(5);
//! assert_eq!(atom.pack(), 0b0100_0101);
//! assert_eq!(Cell::unpack(0b0100_0101), atom);
//!
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//! ```

/// Side length of the backing store of a grid.
pub const GRID_CAPACITY: usize = 64;

/// Side length of the playable region (top-left corner of the store).
pub const PLAY_SIZE: usize = 16;

/// Number of levels in the game.
pub const LEVEL_COUNT: u8 = 30;

/// Tile size in pixels; animation offsets are expressed in this unit.
pub const TILE_SIZE: i32 = 16;

/// Pixels an animated cursor or sliding atom advances per tick.
pub const SLIDE_STEP_PX: i32 = 8;

/// Fixed update interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Score at the start of every level.
pub const START_SCORE: u32 = 500;

/// Score lost for every atom slide.
pub const MOVE_PENALTY: u32 = 5;

/// Bonus per second left on the clock when a level is won.
pub const WIN_BONUS_PER_SECOND: u32 = 10;

/// Bonus seconds counted per update tick during the win tally.
pub const WIN_BONUS_STEPS_PER_TICK: u32 = 3;

/// Frames in the explosion sequence of a single atom.
pub const EXPLOSION_FRAMES: u8 = 8;

/// Duration of one explosion frame.
pub const EXPLOSION_FRAME_MS: u64 = 40;

/// Title slide auto-advance delay (250 frames at 16ms).
pub const TITLE_SLIDE_MS: u64 = 250 * 16;

/// Number of steps in the exit fade.
pub const EXIT_FADE_STEPS: u8 = 16;

/// Duration of one exit fade step.
pub const EXIT_FADE_STEP_MS: u64 = 30;

/// Alpha added per exit fade step (clamped to 255).
pub const EXIT_FADE_ALPHA_STEP: u16 = 30;

/// Upper bound for a level's time limit, as enforced by the editor.
pub const MAX_DURATION_SECS: u16 = 3600;

/// Description text: two lines of fifteen characters.
pub const DESC_LINES: usize = 2;
pub const DESC_LEN: usize = 15;

/// Number of selectable backgrounds.
pub const BACKGROUND_COUNT: u8 = 3;

/// Atom and wall variants the editor cycles through.
pub const ATOM_VARIANTS: u8 = 48;
pub const WALL_VARIANTS: u8 = 18;

/// Credits panel: one entry per text line, scrolled one pixel per tick.
pub const CREDITS: &[&str] = &[
    "ATOMIKS",
    "",
    "A PUZZLE OF",
    "MOLECULES AND PATIENCE",
    "",
    "BASED ON THE",
    "CLASSIC DOS GAME",
    "",
    "TERMINAL EDITION",
    "THE ATOMIKS DEVELOPERS",
    "",
    "",
    "THANK YOU FOR PLAYING",
    "",
    "ALL THIRTY MOLECULES",
    "HAVE BEEN BUILT",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "PRESS ENTER",
];

/// Pixel height of one credits line and of the visible window.
pub const CREDITS_LINE_PX: u32 = 8;
pub const CREDITS_VIEW_PX: u32 = 181;

/// Type tags (high two bits of a packed cell).
pub const TAG_FREE: u8 = 0b1000_0000;
pub const TAG_ATOM: u8 = 0b0100_0000;
pub const TAG_WALL: u8 = 0b1100_0000;
pub const TAG_MASK: u8 = 0b1100_0000;

/// Sprite index (low six bits of a packed cell).
pub const INDEX_MASK: u8 = 0b0011_1111;

/// One grid cell.
///
/// `Empty` is "nothing here" (outside the level's shape) and is distinct
/// from `Free`, which is walkable floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Free,
    Atom(u8),
    Wall(u8),
}

impl Cell {
    /// Decode a packed byte. Index bits of `Empty`/`Free` are dropped.
    pub fn unpack(byte: u8) -> Self {
        let index = byte & INDEX_MASK;
        match byte & TAG_MASK {
            TAG_FREE => Cell::Free,
            TAG_ATOM => Cell::Atom(index),
            TAG_WALL => Cell::Wall(index),
            _ => Cell::Empty,
        }
    }

    /// Encode into the on-disk byte. Indices above 63 are masked.
    pub fn pack(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Free => TAG_FREE,
            Cell::Atom(i) => TAG_ATOM | (i & INDEX_MASK),
            Cell::Wall(i) => TAG_WALL | (i & INDEX_MASK),
        }
    }

    /// Type tag: one of `0`, `TAG_FREE`, `TAG_ATOM`, `TAG_WALL`.
    pub fn tag(self) -> u8 {
        self.pack() & TAG_MASK
    }

    /// Sprite index (0 for `Empty` and `Free`).
    pub fn index(self) -> u8 {
        self.pack() & INDEX_MASK
    }

    pub fn is_free(self) -> bool {
        self == Cell::Free
    }

    pub fn is_atom(self) -> bool {
        matches!(self, Cell::Atom(_))
    }

    /// Atoms and walls; these define a grid's bounding box.
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Atom(_) | Cell::Wall(_))
    }
}

/// Movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit step `(dx, dy)`; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Symbolic input commands produced by the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Enter,
    Space,
    Esc,
    Home,
    End,
    Fullscreen,
    /// Swallowed key (modifier alone, or Alt-chord).
    None,
    Unknown,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move(Direction::Up) => "up",
            Command::Move(Direction::Right) => "right",
            Command::Move(Direction::Down) => "down",
            Command::Move(Direction::Left) => "left",
            Command::Enter => "enter",
            Command::Space => "space",
            Command::Esc => "esc",
            Command::Home => "home",
            Command::End => "end",
            Command::Fullscreen => "fullscreen",
            Command::None => "none",
            Command::Unknown => "unknown",
        }
    }
}

/// Level editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Quit,
    Move(Direction),
    CycleVariant,
    Stamp,
    CycleKind,
    Erase,
    ToggleView,
    DurationDown,
    DurationUp,
    NextDescSlot,
    CycleCursorType,
    CycleBackground,
    Save,
    /// 'A'..='Z' or '.' (clears the slot).
    Char(u8),
}

/// Fire-and-forget audio events emitted by the game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Pickup,
    SlideStart,
    SlideStop,
    Explode,
    MusicTitle,
    MusicEnd,
    MusicFadeOut,
}

/// Top-level screens of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Intro,
    Select,
    Play,
    Won,
    Timeout,
    Credits,
    Exit,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Intro => "intro",
            Screen::Select => "select",
            Screen::Play => "play",
            Screen::Won => "won",
            Screen::Timeout => "timeout",
            Screen::Credits => "credits",
            Screen::Exit => "exit",
        }
    }
}
