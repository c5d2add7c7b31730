//! Level editor model
//!
//! Edits one [`Level`] in place: two views (field and solution) share a
//! cursor, and every key maps to a single [`EditorCommand`]. Saving goes
//! through a [`LevelStore`]; the editor never touches the disk otherwise.
//!
//! | Key | Field view | Solution view |
//! |-----|------------|---------------|
//! | Space | next atom (mod 48) / wall (mod 18) variant | next atom variant, then empty |
//! | Enter | free -> wall -> atom -> empty -> free | - |
//! | Insert | stamp last item | stamp last item |
//! | Delete | erase | erase |

use anyhow::Result;
use log::{info, warn};

use crate::level::{Level, LevelStore};
use crate::types::{
    Cell, Direction, EditorCommand, ATOM_VARIANTS, BACKGROUND_COUNT, DESC_LEN, DESC_LINES,
    MAX_DURATION_SECS, PLAY_SIZE, WALL_VARIANTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorView {
    Field,
    Solution,
}

#[derive(Debug, Clone)]
pub struct LevelEditor {
    number: u8,
    level: Level,
    view: EditorView,
    cursor: (usize, usize),
    /// Last placed or cycled cell, stamped by Insert.
    item: Cell,
    desc_line: usize,
    desc_char: usize,
    quit: bool,
}

impl LevelEditor {
    pub fn new(number: u8, level: Level) -> Self {
        Self {
            number,
            level,
            view: EditorView::Field,
            cursor: (0, 0),
            item: Cell::Empty,
            desc_line: 0,
            desc_char: 0,
            quit: false,
        }
    }

    /// Open `number` from the store, blank if it does not exist yet.
    pub fn open(store: &LevelStore, number: u8) -> Self {
        Self::new(number, store.load(number))
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn item(&self) -> Cell {
        self.item
    }

    /// `(line, char)` of the description slot being typed.
    pub fn desc_slot(&self) -> (usize, usize) {
        (self.desc_line, self.desc_char)
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    fn grid_mut(&mut self) -> &mut crate::grid::Grid {
        match self.view {
            EditorView::Field => &mut self.level.field,
            EditorView::Solution => &mut self.level.solution,
        }
    }

    fn current(&self) -> Cell {
        let (x, y) = self.cursor;
        match self.view {
            EditorView::Field => self.level.field.at(x, y),
            EditorView::Solution => self.level.solution.at(x, y),
        }
    }

    fn put(&mut self, cell: Cell) {
        let (x, y) = self.cursor;
        let grid = self.grid_mut();
        grid.set(x, y, cell);
        grid.recompute_bounds();
    }

    /// Apply one command. Save failures are reported, not fatal.
    pub fn apply(&mut self, cmd: EditorCommand, store: &LevelStore) -> Result<()> {
        match cmd {
            EditorCommand::Quit => self.quit = true,
            EditorCommand::Move(dir) => self.move_cursor(dir),
            EditorCommand::CycleVariant => self.cycle_variant(),
            EditorCommand::Stamp => self.put(self.item),
            EditorCommand::CycleKind => self.cycle_kind(),
            EditorCommand::Erase => self.put(Cell::Empty),
            EditorCommand::ToggleView => {
                self.view = match self.view {
                    EditorView::Field => EditorView::Solution,
                    EditorView::Solution => EditorView::Field,
                }
            }
            EditorCommand::DurationDown => {
                self.level.duration_secs = self.level.duration_secs.saturating_sub(1)
            }
            EditorCommand::DurationUp => {
                if self.level.duration_secs < MAX_DURATION_SECS {
                    self.level.duration_secs += 1;
                }
            }
            EditorCommand::NextDescSlot => {
                self.desc_char += 1;
                if self.desc_char >= DESC_LEN {
                    self.desc_char = 0;
                    self.desc_line = (self.desc_line + 1) % DESC_LINES;
                }
            }
            EditorCommand::CycleCursorType => {
                self.level.cursor_type = if self.level.cursor_type >= 2 {
                    1
                } else {
                    self.level.cursor_type + 1
                };
            }
            EditorCommand::CycleBackground => {
                self.level.background = (self.level.background + 1) % BACKGROUND_COUNT
            }
            EditorCommand::Save => {
                if let Err(err) = store.save(self.number, &self.level) {
                    warn!("failed to save level {}: {:#}", self.number, err);
                    return Err(err);
                }
                info!("saved level {}", self.number);
            }
            EditorCommand::Char(c) => self.type_char(c),
        }
        Ok(())
    }

    fn move_cursor(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        let nx = self.cursor.0 as i32 + dx;
        let ny = self.cursor.1 as i32 + dy;
        let limit = 0..PLAY_SIZE as i32;
        if limit.contains(&nx) && limit.contains(&ny) {
            self.cursor = (nx as usize, ny as usize);
        }
    }

    fn cycle_variant(&mut self) {
        let next = match (self.view, self.current()) {
            (EditorView::Field, Cell::Atom(i)) => Cell::Atom((i + 1) % ATOM_VARIANTS),
            (EditorView::Field, Cell::Wall(i)) => Cell::Wall((i + 1) % WALL_VARIANTS),
            (EditorView::Field, other) => other,
            // Solution atoms run one past the last variant, then clear.
            (EditorView::Solution, Cell::Atom(i)) if i + 1 > ATOM_VARIANTS => Cell::Empty,
            (EditorView::Solution, Cell::Atom(i)) => Cell::Atom(i + 1),
            (EditorView::Solution, _) => Cell::Atom(0),
        };
        self.put(next);
        self.item = next;
    }

    fn cycle_kind(&mut self) {
        if self.view != EditorView::Field {
            return;
        }
        let next = match self.current() {
            Cell::Free => Cell::Wall(0),
            Cell::Wall(_) => Cell::Atom(0),
            Cell::Atom(_) => Cell::Empty,
            Cell::Empty => Cell::Free,
        };
        self.put(next);
        self.item = next;
    }

    fn type_char(&mut self, c: u8) {
        let byte = match c {
            b'.' => 0,
            b'A'..=b'Z' => c,
            b'a'..=b'z' => c.to_ascii_uppercase(),
            _ => return,
        };
        self.level.desc[self.desc_line][self.desc_char] = byte;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use std::path::PathBuf;

    fn store() -> LevelStore {
        LevelStore::new(PathBuf::from("/nonexistent/atomiks-editor-tests"))
    }

    fn editor_with(rows: &[&str]) -> LevelEditor {
        let mut level = Level::blank();
        level.field = Grid::from_ascii(rows);
        LevelEditor::new(1, level)
    }

    fn run(editor: &mut LevelEditor, cmds: &[EditorCommand]) {
        let store = store();
        for &cmd in cmds {
            editor.apply(cmd, &store).unwrap();
        }
    }

    #[test]
    fn test_cursor_stays_in_play_region() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::Move(Direction::Left), EditorCommand::Move(Direction::Up)]);
        assert_eq!(ed.cursor(), (0, 0));
        for _ in 0..40 {
            run(&mut ed, &[EditorCommand::Move(Direction::Right), EditorCommand::Move(Direction::Down)]);
        }
        assert_eq!(ed.cursor(), (PLAY_SIZE - 1, PLAY_SIZE - 1));
    }

    #[test]
    fn test_cycle_kind_on_field() {
        let mut ed = editor_with(&["."]);
        run(&mut ed, &[EditorCommand::CycleKind]);
        assert_eq!(ed.level().field.at(0, 0), Cell::Wall(0));
        run(&mut ed, &[EditorCommand::CycleKind]);
        assert_eq!(ed.level().field.at(0, 0), Cell::Atom(0));
        run(&mut ed, &[EditorCommand::CycleKind]);
        assert_eq!(ed.level().field.at(0, 0), Cell::Empty);
        run(&mut ed, &[EditorCommand::CycleKind]);
        assert_eq!(ed.level().field.at(0, 0), Cell::Free);
        assert_eq!(ed.item(), Cell::Free);
    }

    #[test]
    fn test_cycle_kind_ignored_in_solution_view() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::ToggleView, EditorCommand::CycleKind]);
        assert_eq!(ed.level().solution.at(0, 0), Cell::Empty);
    }

    #[test]
    fn test_field_variants_wrap() {
        let mut ed = editor_with(&["#"]);
        for _ in 0..WALL_VARIANTS {
            run(&mut ed, &[EditorCommand::CycleVariant]);
        }
        assert_eq!(ed.level().field.at(0, 0), Cell::Wall(0));

        let mut ed = editor_with(&["a"]);
        run(&mut ed, &[EditorCommand::CycleVariant]);
        assert_eq!(ed.level().field.at(0, 0), Cell::Atom(1));
        for _ in 1..ATOM_VARIANTS {
            run(&mut ed, &[EditorCommand::CycleVariant]);
        }
        assert_eq!(ed.level().field.at(0, 0), Cell::Atom(0));
    }

    #[test]
    fn test_solution_variants_clear_after_last() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::ToggleView, EditorCommand::CycleVariant]);
        assert_eq!(ed.level().solution.at(0, 0), Cell::Atom(0));
        for _ in 0..ATOM_VARIANTS {
            run(&mut ed, &[EditorCommand::CycleVariant]);
        }
        assert_eq!(ed.level().solution.at(0, 0), Cell::Atom(ATOM_VARIANTS));
        run(&mut ed, &[EditorCommand::CycleVariant]);
        assert_eq!(ed.level().solution.at(0, 0), Cell::Empty);
        assert_eq!(ed.level().solution.width(), 0);
    }

    #[test]
    fn test_stamp_and_erase() {
        let mut ed = editor_with(&["#"]);
        run(
            &mut ed,
            &[
                EditorCommand::CycleVariant,
                EditorCommand::Move(Direction::Right),
                EditorCommand::Stamp,
            ],
        );
        assert_eq!(ed.level().field.at(1, 0), Cell::Wall(1));
        assert_eq!(ed.level().field.width(), 2);

        run(&mut ed, &[EditorCommand::Erase]);
        assert_eq!(ed.level().field.at(1, 0), Cell::Empty);
        assert_eq!(ed.level().field.width(), 1);
    }

    #[test]
    fn test_duration_bounds() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::DurationDown]);
        assert_eq!(ed.level().duration_secs, 0);

        ed.level.duration_secs = MAX_DURATION_SECS - 1;
        run(&mut ed, &[EditorCommand::DurationUp, EditorCommand::DurationUp]);
        assert_eq!(ed.level().duration_secs, MAX_DURATION_SECS);
    }

    #[test]
    fn test_description_typing_wraps_lines() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::Char(b'W')]);
        for _ in 0..DESC_LEN {
            run(&mut ed, &[EditorCommand::NextDescSlot]);
        }
        assert_eq!(ed.desc_slot(), (1, 0));
        run(&mut ed, &[EditorCommand::Char(b'h'), EditorCommand::Char(b'7')]);
        assert_eq!(ed.level().desc_line(0), "W");
        assert_eq!(ed.level().desc_line(1), "H");

        run(&mut ed, &[EditorCommand::Char(b'.')]);
        assert_eq!(ed.level().desc_line(1), "");

        for _ in 0..DESC_LEN {
            run(&mut ed, &[EditorCommand::NextDescSlot]);
        }
        assert_eq!(ed.desc_slot(), (0, 0));
    }

    #[test]
    fn test_cursor_type_and_background_cycle() {
        let mut ed = editor_with(&[]);
        run(&mut ed, &[EditorCommand::CycleCursorType]);
        assert_eq!(ed.level().cursor_type, 2);
        run(&mut ed, &[EditorCommand::CycleCursorType]);
        assert_eq!(ed.level().cursor_type, 1);

        for expected in [1, 2, 0] {
            run(&mut ed, &[EditorCommand::CycleBackground]);
            assert_eq!(ed.level().background, expected);
        }
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut ed = editor_with(&["a"]);
        assert!(ed.apply(EditorCommand::Save, &store()).is_err());
        assert!(!ed.quit());
        run(&mut ed, &[EditorCommand::Quit]);
        assert!(ed.quit());
    }
}
