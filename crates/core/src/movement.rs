//! Movement engine - cursor hops and atom slides
//!
//! Only one transition is in flight at a time: while the cursor hops or an
//! atom slides, new directional commands are ignored. Both animations
//! advance `SLIDE_STEP_PX` pixels per tick; pixel positions are relative to
//! the grid origin (cell * `TILE_SIZE`).

use crate::grid::Grid;
use crate::types::{Cell, Direction, PLAY_SIZE, SLIDE_STEP_PX, TILE_SIZE};

/// Number of free cells an atom at `(x, y)` can slide through in `dir`.
///
/// Greedy: the atom always runs the whole free stretch, stopping at the
/// first non-free cell or the edge of the playable region. Returns 0 if
/// `(x, y)` is not an atom.
pub fn slide_distance(field: &Grid, x: usize, y: usize, dir: Direction) -> usize {
    if !field.at(x, y).is_atom() {
        return 0;
    }

    let (dx, dy) = dir.delta();
    let mut cx = x as i32 + dx;
    let mut cy = y as i32 + dy;
    let mut distance = 0;
    while (0..PLAY_SIZE as i32).contains(&cx)
        && (0..PLAY_SIZE as i32).contains(&cy)
        && field.at(cx as usize, cy as usize).is_free()
    {
        distance += 1;
        cx += dx;
        cy += dy;
    }
    distance
}

/// The player's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    /// 0 when empty-handed, otherwise the skin shown while carrying an atom.
    pub state: u8,
    /// Per-level cursor skin (1 or 2).
    pub skin: u8,
    /// Sub-cell animation offset in pixels.
    pub offset: (i32, i32),
    target: (i32, i32),
    step: (i32, i32),
    moving: bool,
}

impl Cursor {
    pub fn new(x: usize, y: usize, skin: u8) -> Self {
        Self {
            x,
            y,
            state: 0,
            skin,
            offset: (0, 0),
            target: (0, 0),
            step: (0, 0),
            moving: false,
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.state != 0
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

/// An atom in the middle of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LooseTile {
    /// Atom sprite index.
    pub atom: u8,
    /// Current pixel position.
    pub pos: (i32, i32),
    pub target: (i32, i32),
    pub step: (i32, i32),
    /// Destination cell.
    pub dest: (usize, usize),
}

/// What a directional command started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStart {
    Hop,
    Slide { distance: usize },
}

/// What a tick finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Hop,
    Slide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mover {
    cursor: Cursor,
    loose: Option<LooseTile>,
}

impl Mover {
    pub fn new(start: (usize, usize), skin: u8) -> Self {
        Self {
            cursor: Cursor::new(start.0, start.1, skin),
            loose: None,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn loose(&self) -> Option<&LooseTile> {
        self.loose.as_ref()
    }

    pub fn is_sliding(&self) -> bool {
        self.loose.is_some()
    }

    pub fn in_flight(&self) -> bool {
        self.cursor.moving || self.loose.is_some()
    }

    /// Pick up or drop the atom under the cursor.
    /// Returns `Some(true)` on pickup, `Some(false)` on drop, `None` if the
    /// cursor is not on an atom.
    pub fn toggle_pickup(&mut self, field: &Grid) -> Option<bool> {
        if !field.at(self.cursor.x, self.cursor.y).is_atom() {
            return None;
        }
        if self.cursor.state == 0 {
            self.cursor.state = self.cursor.skin;
            Some(true)
        } else {
            self.cursor.state = 0;
            Some(false)
        }
    }

    /// Start a hop (empty-handed) or a slide (carrying) in `dir`.
    pub fn command(&mut self, field: &mut Grid, dir: Direction) -> Option<MoveStart> {
        if self.in_flight() {
            return None;
        }
        if self.cursor.is_carrying() {
            self.start_slide(field, dir)
        } else {
            self.start_hop(field, dir)
        }
    }

    fn start_hop(&mut self, field: &Grid, dir: Direction) -> Option<MoveStart> {
        let (dx, dy) = dir.delta();
        let nx = self.cursor.x as i32 + dx;
        let ny = self.cursor.y as i32 + dy;
        match field.get(nx, ny) {
            None | Some(Cell::Empty) => return None,
            Some(_) => {}
        }

        let c = &mut self.cursor;
        c.step = (dx, dy);
        c.offset = (0, 0);
        c.target = (dx * TILE_SIZE, dy * TILE_SIZE);
        c.moving = true;
        Some(MoveStart::Hop)
    }

    fn start_slide(&mut self, field: &mut Grid, dir: Direction) -> Option<MoveStart> {
        let (x, y) = (self.cursor.x, self.cursor.y);
        let distance = slide_distance(field, x, y, dir);
        if distance == 0 {
            return None;
        }

        let atom = field.index_at(x, y);
        field.set(x, y, Cell::Free);

        let (dx, dy) = dir.delta();
        let d = distance as i32;
        let pos = (x as i32 * TILE_SIZE, y as i32 * TILE_SIZE);
        self.loose = Some(LooseTile {
            atom,
            pos,
            target: (pos.0 + dx * d * TILE_SIZE, pos.1 + dy * d * TILE_SIZE),
            step: (dx, dy),
            dest: ((x as i32 + dx * d) as usize, (y as i32 + dy * d) as usize),
        });
        self.cursor.offset = (0, 0);
        Some(MoveStart::Slide { distance })
    }

    /// Advance the transition in flight by one tick.
    pub fn tick(&mut self, field: &mut Grid) -> Option<Settled> {
        if self.cursor.moving {
            let c = &mut self.cursor;
            c.offset.0 += c.step.0 * SLIDE_STEP_PX;
            c.offset.1 += c.step.1 * SLIDE_STEP_PX;
            if c.offset == c.target {
                c.moving = false;
                c.x = (c.x as i32 + c.step.0) as usize;
                c.y = (c.y as i32 + c.step.1) as usize;
                c.offset = (0, 0);
                return Some(Settled::Hop);
            }
            return None;
        }

        let tile = self.loose.as_mut()?;
        let mx = tile.step.0 * SLIDE_STEP_PX;
        let my = tile.step.1 * SLIDE_STEP_PX;
        tile.pos.0 += mx;
        tile.pos.1 += my;
        self.cursor.offset.0 += mx;
        self.cursor.offset.1 += my;
        if tile.pos != tile.target {
            return None;
        }

        let (x, y) = tile.dest;
        field.set(x, y, Cell::Atom(tile.atom));
        self.cursor.x = x;
        self.cursor.y = y;
        self.cursor.offset = (0, 0);
        self.loose = None;
        Some(Settled::Slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(mover: &mut Mover, field: &mut Grid) -> (Settled, usize) {
        for ticks in 1..=256 {
            if let Some(done) = mover.tick(field) {
                return (done, ticks);
            }
        }
        panic!("transition never settled");
    }

    #[test]
    fn test_slide_distance_stops_at_wall() {
        let field = Grid::from_ascii(&["a..#"]);
        assert_eq!(slide_distance(&field, 0, 0, Direction::Right), 2);
    }

    #[test]
    fn test_slide_distance_blocked() {
        let field = Grid::from_ascii(&["a#"]);
        assert_eq!(slide_distance(&field, 0, 0, Direction::Right), 0);
        assert_eq!(slide_distance(&field, 0, 0, Direction::Left), 0);
        assert_eq!(slide_distance(&field, 0, 0, Direction::Up), 0);
    }

    #[test]
    fn test_slide_distance_requires_atom() {
        let field = Grid::from_ascii(&["...."]);
        assert_eq!(slide_distance(&field, 0, 0, Direction::Right), 0);
    }

    #[test]
    fn test_slide_distance_stops_at_play_region_edge() {
        let mut field = Grid::new();
        for x in 0..20 {
            field.set(x, 0, Cell::Free);
        }
        field.set(0, 0, Cell::Atom(1));
        assert_eq!(slide_distance(&field, 0, 0, Direction::Right), 15);
    }

    #[test]
    fn test_slide_distance_vertical() {
        let field = Grid::from_ascii(&["#", ".", ".", "a", "."]);
        assert_eq!(slide_distance(&field, 0, 3, Direction::Up), 2);
        assert_eq!(slide_distance(&field, 0, 3, Direction::Down), 1);
    }

    #[test]
    fn test_hop_takes_two_ticks() {
        let mut field = Grid::from_ascii(&["..#"]);
        let mut mover = Mover::new((0, 0), 1);

        assert_eq!(mover.command(&mut field, Direction::Right), Some(MoveStart::Hop));
        assert!(mover.in_flight());
        assert_eq!(mover.tick(&mut field), None);
        assert_eq!(mover.cursor().offset, (8, 0));
        assert_eq!(mover.tick(&mut field), Some(Settled::Hop));
        assert_eq!((mover.cursor().x, mover.cursor().y), (1, 0));
        assert_eq!(mover.cursor().offset, (0, 0));
    }

    #[test]
    fn test_hop_onto_wall_is_allowed_but_not_into_empty() {
        let mut field = Grid::from_ascii(&[".#", " ."]);
        let mut mover = Mover::new((0, 0), 1);

        assert_eq!(mover.command(&mut field, Direction::Down), None);
        assert_eq!(mover.command(&mut field, Direction::Left), None);
        assert_eq!(mover.command(&mut field, Direction::Right), Some(MoveStart::Hop));
    }

    #[test]
    fn test_commands_ignored_while_in_flight() {
        let mut field = Grid::from_ascii(&["..."]);
        let mut mover = Mover::new((0, 0), 1);

        mover.command(&mut field, Direction::Right);
        assert_eq!(mover.command(&mut field, Direction::Right), None);
        settle(&mut mover, &mut field);
        assert_eq!(mover.cursor().x, 1);
    }

    #[test]
    fn test_pickup_toggle() {
        let field = Grid::from_ascii(&["a."]);
        let mut mover = Mover::new((0, 0), 2);

        assert_eq!(mover.toggle_pickup(&field), Some(true));
        assert_eq!(mover.cursor().state, 2);
        assert_eq!(mover.toggle_pickup(&field), Some(false));
        assert_eq!(mover.cursor().state, 0);

        let mut off_atom = Mover::new((1, 0), 1);
        assert_eq!(off_atom.toggle_pickup(&field), None);
    }

    #[test]
    fn test_slide_moves_atom_and_cursor() {
        let mut field = Grid::from_ascii(&["c...#"]);
        let mut mover = Mover::new((0, 0), 1);
        mover.toggle_pickup(&field);

        let start = mover.command(&mut field, Direction::Right);
        assert_eq!(start, Some(MoveStart::Slide { distance: 3 }));
        assert_eq!(field.at(0, 0), Cell::Free);
        let tile = *mover.loose().unwrap();
        assert_eq!(tile.atom, 2);
        assert_eq!(tile.target, (48, 0));
        assert_eq!(tile.dest, (3, 0));

        let (done, ticks) = settle(&mut mover, &mut field);
        assert_eq!(done, Settled::Slide);
        assert_eq!(ticks, 6);
        assert_eq!(field.at(3, 0), Cell::Atom(2));
        assert_eq!((mover.cursor().x, mover.cursor().y), (3, 0));
        assert!(mover.cursor().is_carrying());
        assert!(mover.loose().is_none());
    }

    #[test]
    fn test_blocked_slide_does_nothing() {
        let mut field = Grid::from_ascii(&["a#"]);
        let mut mover = Mover::new((0, 0), 1);
        mover.toggle_pickup(&field);

        assert_eq!(mover.command(&mut field, Direction::Right), None);
        assert_eq!(field.at(0, 0), Cell::Atom(0));
        assert!(!mover.in_flight());
    }
}
