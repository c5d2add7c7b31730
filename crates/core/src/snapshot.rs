use crate::slideshow::SlideKind;
use crate::types::{Screen, DESC_LEN, DESC_LINES, PLAY_SIZE};

/// Packed playable region, `[y][x]`.
pub type PackedGrid = [[u8; PLAY_SIZE]; PLAY_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorSnapshot {
    pub x: usize,
    pub y: usize,
    /// Sub-cell animation offset in pixels.
    pub offset: (i32, i32),
    /// 0 when empty-handed, otherwise the carrying skin.
    pub state: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LooseSnapshot {
    pub atom: u8,
    pub pos: (i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplosionSnapshot {
    pub x: usize,
    pub y: usize,
    pub frame: u8,
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub screen: Screen,
    pub level: u8,
    pub max_auth_level: u8,
    /// Selection badge: level already beaten (or everything unlocked).
    pub level_completed: bool,
    pub field: PackedGrid,
    pub field_size: (usize, usize),
    pub solution: PackedGrid,
    pub solution_size: (usize, usize),
    pub cursor: Option<CursorSnapshot>,
    pub loose: Option<LooseSnapshot>,
    pub explosion: Option<ExplosionSnapshot>,
    pub score: u32,
    pub hiscore: u32,
    pub time_left_secs: u32,
    pub paused: bool,
    pub frozen: bool,
    pub show_instructions: bool,
    pub desc: [[u8; DESC_LEN]; DESC_LINES],
    pub background: u8,
    pub credits_offset: u32,
    pub slide: Option<SlideKind>,
    pub fade_alpha: u8,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            screen: Screen::Intro,
            level: 1,
            max_auth_level: 1,
            level_completed: false,
            field: [[0; PLAY_SIZE]; PLAY_SIZE],
            field_size: (0, 0),
            solution: [[0; PLAY_SIZE]; PLAY_SIZE],
            solution_size: (0, 0),
            cursor: None,
            loose: None,
            explosion: None,
            score: 0,
            hiscore: 0,
            time_left_secs: 0,
            paused: false,
            frozen: false,
            show_instructions: false,
            desc: [[0; DESC_LEN]; DESC_LINES],
            background: 0,
            credits_offset: 0,
            slide: None,
            fade_alpha: 0,
        }
    }
}

impl Snapshot {
    /// Description line as text, stopping at the first unused slot.
    pub fn desc_line(&self, line: usize) -> String {
        self.desc[line]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }
}

pub(crate) fn pack_grid(grid: &crate::grid::Grid, out: &mut PackedGrid) {
    for (y, row) in out.iter_mut().enumerate() {
        for (x, byte) in row.iter_mut().enumerate() {
            *byte = grid.at(x, y).pack();
        }
    }
}
