//! Grid tests

use atomiks::core::Grid;
use atomiks::types::{Cell, GRID_CAPACITY, PLAY_SIZE};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), 0);
    assert_eq!(grid.height(), 0);
    for y in 0..PLAY_SIZE {
        for x in 0..PLAY_SIZE {
            assert_eq!(grid.at(x, y), Cell::Empty, "cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_CAPACITY as i32, 0), None);
    assert_eq!(grid.get(0, GRID_CAPACITY as i32), None);
    assert_eq!(grid.get(63, 63), Some(Cell::Empty));
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new();
    grid.set(5, 10, Cell::Atom(7));
    assert_eq!(grid.at(5, 10), Cell::Atom(7));
    assert_eq!(grid.index_at(5, 10), 7);

    grid.set(5, 10, Cell::Free);
    assert_eq!(grid.at(5, 10), Cell::Free);
}

#[test]
fn test_bounds_ignore_free_cells() {
    let mut grid = Grid::from_ascii(&["....", ".a..", "...."]);
    assert_eq!((grid.width(), grid.height()), (2, 2));

    grid.set(3, 2, Cell::Wall(4));
    assert_eq!((grid.width(), grid.height()), (2, 2), "bounds are recomputed on demand");
    grid.recompute_bounds();
    assert_eq!((grid.width(), grid.height()), (4, 3));
}

#[test]
fn test_bounds_ignore_cells_outside_play_region() {
    let mut grid = Grid::new();
    grid.set(PLAY_SIZE, 0, Cell::Wall(0));
    grid.recompute_bounds();
    assert_eq!(grid.width(), 0);
}

#[test]
fn test_atoms_in_row_major_order() {
    let grid = Grid::from_ascii(&["a.b", "#c#"]);
    let atoms: Vec<_> = grid.atoms().collect();
    assert_eq!(atoms, vec![(0, 0), (2, 0), (1, 1)]);
}

#[test]
fn test_play_bytes_keep_cells() {
    let grid = Grid::from_ascii(&["#a.", " b#"]);
    let mut bytes = [0u8; PLAY_SIZE * PLAY_SIZE];
    grid.write_play_bytes(&mut bytes);

    let mut back = Grid::new();
    back.read_play_bytes(&bytes);
    assert_eq!(back, grid);
}

#[test]
fn test_clear() {
    let mut grid = Grid::from_ascii(&["##"]);
    grid.clear();
    assert_eq!(grid, Grid::new());
}
