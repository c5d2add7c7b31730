//! Grid module - the 64x64 cell store behind a level's field and solution
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) with x left to right, y top to bottom, both 0..63.
//! Only the top-left 16x16 region is playable; the rest is capacity.

use crate::types::{Cell, GRID_CAPACITY, PLAY_SIZE};

/// Total number of cells in the backing store
const GRID_CELLS: usize = GRID_CAPACITY * GRID_CAPACITY;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major cells (y * CAPACITY + x)
    cells: [Cell; GRID_CELLS],
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_CELLS],
            width: 0,
            height: 0,
        }
    }

    /// Flat index. Coordinates must be below `GRID_CAPACITY`.
    #[inline(always)]
    fn index(x: usize, y: usize) -> usize {
        debug_assert!(
            x < GRID_CAPACITY && y < GRID_CAPACITY,
            "grid coordinate ({x}, {y}) out of range"
        );
        y * GRID_CAPACITY + x
    }

    /// Store a cell. Panics if `x` or `y` is 64 or more.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[Self::index(x, y)] = cell;
    }

    /// Read a cell. Panics if `x` or `y` is 64 or more.
    pub fn at(&self, x: usize, y: usize) -> Cell {
        self.cells[Self::index(x, y)]
    }

    /// Packed type tag of a cell.
    pub fn tag(&self, x: usize, y: usize) -> u8 {
        self.at(x, y).tag()
    }

    /// Sprite index (0..63) of a cell.
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.at(x, y).index()
    }

    /// Checked read with signed coordinates, for neighbour lookups.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= GRID_CAPACITY as i32 || y >= GRID_CAPACITY as i32 {
            return None;
        }
        Some(self.at(x as usize, y as usize))
    }

    /// Width of the bounding box of occupied cells (as of the last
    /// [`recompute_bounds`](Self::recompute_bounds)).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Recompute `width`/`height` from atoms and walls in the playable region.
    pub fn recompute_bounds(&mut self) {
        let mut width = 0;
        let mut height = 0;
        for y in 0..PLAY_SIZE {
            for x in 0..PLAY_SIZE {
                if self.at(x, y).is_occupied() {
                    width = width.max(x + 1);
                    height = height.max(y + 1);
                }
            }
        }
        self.width = width;
        self.height = height;
    }

    /// Playable region as packed bytes, row-major.
    pub fn write_play_bytes(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), PLAY_SIZE * PLAY_SIZE);
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.at(i % PLAY_SIZE, i / PLAY_SIZE).pack();
        }
    }

    /// Fill the playable region from packed bytes and recompute bounds.
    pub fn read_play_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), PLAY_SIZE * PLAY_SIZE);
        for (i, &byte) in bytes.iter().enumerate() {
            self.set(i % PLAY_SIZE, i / PLAY_SIZE, Cell::unpack(byte));
        }
        self.recompute_bounds();
    }

    /// Coordinates of every atom inside the bounding box, row-major.
    pub fn atoms(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.at(x, y).is_atom())
    }

    /// Fill the playable region from ASCII rows, one char per cell:
    /// `.` free, `#` wall (variant 0), `a`..`z` atom variants 0..25,
    /// anything else empty. Recomputes bounds.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate().take(PLAY_SIZE) {
            for (x, ch) in row.bytes().enumerate().take(PLAY_SIZE) {
                let cell = match ch {
                    b'.' => Cell::Free,
                    b'#' => Cell::Wall(0),
                    b'a'..=b'z' => Cell::Atom(ch - b'a'),
                    _ => Cell::Empty,
                };
                grid.set(x, y, cell);
            }
        }
        grid.recompute_bounds();
        grid
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.width = 0;
        self.height = 0;
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TAG_ATOM, TAG_WALL};

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), 0);
        assert_eq!(Grid::index(63, 0), 63);
        assert_eq!(Grid::index(0, 1), 64);
        assert_eq!(Grid::index(63, 63), GRID_CELLS - 1);
    }

    #[test]
    fn test_set_at_tag_index() {
        let mut grid = Grid::new();
        grid.set(3, 4, Cell::Atom(12));
        grid.set(63, 63, Cell::Wall(5));

        assert_eq!(grid.at(3, 4), Cell::Atom(12));
        assert_eq!(grid.tag(3, 4), TAG_ATOM);
        assert_eq!(grid.index_at(3, 4), 12);
        assert_eq!(grid.tag(63, 63), TAG_WALL);
        assert_eq!(grid.index_at(63, 63), 5);
        assert_eq!(grid.at(0, 0), Cell::Empty);
    }

    #[test]
    fn test_checked_get() {
        let grid = Grid::new();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 64), None);
        assert_eq!(grid.get(63, 63), Some(Cell::Empty));
    }

    #[test]
    fn test_bounds_ignore_free_cells() {
        let grid = Grid::from_ascii(&["#.a", "...", "..........."]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_empty_grid_has_zero_bounds() {
        let grid = Grid::from_ascii(&["....", "...."]);
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
    }

    #[test]
    fn test_atoms_in_row_major_order() {
        let grid = Grid::from_ascii(&["a.#", ".b.", "c.."]);
        let atoms: Vec<_> = grid.atoms().collect();
        assert_eq!(atoms, vec![(0, 0), (1, 1), (0, 2)]);
    }

    #[test]
    fn test_play_bytes_roundtrip() {
        let grid = Grid::from_ascii(&["#a.", ".#b"]);
        let mut bytes = [0u8; PLAY_SIZE * PLAY_SIZE];
        grid.write_play_bytes(&mut bytes);

        let mut back = Grid::new();
        back.read_play_bytes(&bytes);
        assert_eq!(back, grid);
    }
}
