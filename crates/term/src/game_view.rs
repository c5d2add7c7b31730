//! GameView: maps a core [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One grid cell is drawn `cell_w` columns wide and `cell_h` rows high.
//! Pixel offsets from the core (`TILE_SIZE` pixels per cell) are scaled to
//! that size and rounded to the nearest character.

use crate::core::{PackedGrid, SlideKind, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, Screen, CREDITS, CREDITS_LINE_PX, CREDITS_VIEW_PX, PLAY_SIZE, TILE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = 24;

const BLACK: Rgb = Rgb::new(0, 0, 0);
pub(crate) const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BLACK);
pub(crate) const LABEL: CellStyle = CellStyle::new(Rgb::new(240, 240, 240), BLACK).bold();
pub(crate) const HINT: CellStyle = CellStyle::new(Rgb::new(140, 140, 150), BLACK).dim();
pub(crate) const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
pub(crate) const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 110)).bold();

/// Floor colour per level background.
pub(crate) const BACKGROUNDS: [Rgb; 3] = [
    Rgb::new(24, 32, 52),
    Rgb::new(44, 30, 24),
    Rgb::new(22, 42, 30),
];

const ATOM_COLORS: [Rgb; 6] = [
    Rgb::new(230, 230, 230),
    Rgb::new(220, 70, 70),
    Rgb::new(70, 110, 230),
    Rgb::new(60, 60, 60),
    Rgb::new(230, 200, 60),
    Rgb::new(80, 200, 110),
];

const ELEMENTS: [char; 8] = ['H', 'O', 'N', 'C', 'S', 'P', 'F', 'K'];

const BURST: [char; 8] = ['·', '+', 'x', '*', '✶', '✷', '*', '·'];

const INSTRUCTIONS: [&str; 5] = [
    "ARROWS MOVE THE CURSOR",
    "ENTER GRABS AN ATOM",
    "ARROWS THEN SLIDE IT",
    "BUILD THE MOLECULE",
    "SPACE PAUSES",
];

const INFO_PAGES: [[&str; 4]; 3] = [
    [
        "REBUILD THE MOLECULE",
        "SHOWN ON THE RIGHT",
        "BY SLIDING ATOMS",
        "AROUND THE FIELD",
    ],
    [
        "A SLIDING ATOM ONLY",
        "STOPS AT A WALL OR",
        "AT ANOTHER ATOM",
        "",
    ],
    [
        "EVERY SLIDE COSTS 5",
        "POINTS. TIME LEFT",
        "WHEN YOU FINISH IS",
        "WORTH 10 PER SECOND",
    ],
];

/// The terminal renderer for every game screen.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub(crate) fn board_w(&self) -> u16 {
        PLAY_SIZE as u16 * self.cell_w + 2
    }

    pub(crate) fn board_h(&self) -> u16 {
        PLAY_SIZE as u16 * self.cell_h + 2
    }

    /// Smallest viewport that fits the play screen.
    pub fn min_viewport(&self) -> Viewport {
        Viewport::new(self.board_w() + 2 + PANEL_W, self.board_h())
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// The exit screen draws black here; the fade over the previous frame
    /// is done by [`TerminalRenderer::present_faded`](crate::TerminalRenderer::present_faded).
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.into_cell(' '));

        let min = self.min_viewport();
        if viewport.width < min.width || viewport.height < min.height {
            fb.put_str(0, 0, "TERMINAL TOO SMALL", LABEL);
            return;
        }

        match snap.screen {
            Screen::Intro => self.draw_slide(fb, snap, viewport),
            Screen::Select => self.draw_select(fb, snap, viewport),
            Screen::Play | Screen::Won | Screen::Timeout => self.draw_play(fb, snap, viewport),
            Screen::Credits => self.draw_credits(fb, snap, viewport),
            Screen::Exit => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub(crate) fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let min = self.min_viewport();
        (
            viewport.width.saturating_sub(min.width) / 2,
            viewport.height.saturating_sub(min.height) / 2,
        )
    }

    fn draw_slide(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let w = viewport.width;
        let mid = viewport.height / 2;
        match snap.slide {
            Some(SlideKind::Title) => {
                fb.put_str_centered(0, w, mid.saturating_sub(2), "A  T  O  M  I  K  S", BANNER);
                fb.put_str_centered(0, w, mid, "A MOLECULAR PUZZLE", TEXT);
                fb.put_str_centered(0, w, mid + 3, "PRESS ANY KEY", HINT);
            }
            Some(SlideKind::Info(page)) => {
                let lines = &INFO_PAGES[(page as usize).min(INFO_PAGES.len() - 1)];
                let top = mid.saturating_sub(lines.len() as u16 / 2 + 2);
                fb.put_str_centered(0, w, top, "HOW TO PLAY", LABEL);
                for (i, line) in lines.iter().enumerate() {
                    fb.put_str_centered(0, w, top + 2 + i as u16, line, TEXT);
                }
                fb.put_str_centered(0, w, top + 3 + lines.len() as u16, "PRESS ANY KEY", HINT);
            }
            Some(SlideKind::Fade(_)) | None => {}
        }
    }

    fn draw_select(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let (ox, oy) = self.origin(viewport);
        let min = self.min_viewport();
        let w = min.width;

        fb.draw_border(ox, oy, w, min.height, BORDER);
        fb.put_str_centered(ox, w, oy + 1, "SELECT LEVEL", LABEL);

        let mut title = [b' '; 12];
        title[..2].copy_from_slice(b"< ");
        title[2..8].copy_from_slice(b"LEVEL ");
        title[8] = b'0' + snap.level / 10;
        title[9] = b'0' + snap.level % 10;
        title[10..].copy_from_slice(b" >");
        let title = std::str::from_utf8(&title).unwrap_or("");
        fb.put_str_centered(ox, w, oy + 3, title, BANNER);

        let (sw, sh) = snap.solution_size;
        let px = ox + w.saturating_sub(sw as u16) / 2;
        self.draw_preview(fb, &snap.solution, snap.solution_size, px, oy + 5, 0);
        let below = oy + 6 + sh as u16;

        for line in 0..snap.desc.len() {
            fb.put_str_centered(ox, w, below + line as u16, &snap.desc_line(line), TEXT);
        }

        let hs_y = oy + min.height - 5;
        fb.put_str(ox + 2, hs_y, "HISCORE", LABEL);
        fb.put_u32(ox + 10, hs_y, snap.hiscore, TEXT);
        if snap.level_completed {
            fb.put_str(ox + w - 12, hs_y, "COMPLETED", BANNER);
        }
        fb.put_str_centered(ox, w, oy + min.height - 2, "ENTER PLAY   ESC QUIT", HINT);
    }

    fn draw_play(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let (ox, oy) = self.origin(viewport);
        let floor = BACKGROUNDS[(snap.background as usize).min(BACKGROUNDS.len() - 1)];

        fb.draw_border(ox, oy, self.board_w(), self.board_h(), BORDER);
        let gx = ox + 1;
        let gy = oy + 1;
        for y in 0..PLAY_SIZE {
            for x in 0..PLAY_SIZE {
                let cell = Cell::unpack(snap.field[y][x]);
                self.draw_cell(fb, gx, gy, x as u16, y as u16, cell, floor);
            }
        }

        if let Some(loose) = snap.loose {
            let (col, row) = self.px_to_char(loose.pos);
            let (ch, style) = atom_style(loose.atom);
            self.fill_at(fb, gx + col, gy + row, ch, style);
        }

        if let Some(burst) = snap.explosion {
            let style = CellStyle::new(Rgb::new(255, 170, 40), floor).bold();
            let ch = BURST[(burst.frame as usize).min(BURST.len() - 1)];
            self.fill_at(
                fb,
                gx + burst.x as u16 * self.cell_w,
                gy + burst.y as u16 * self.cell_h,
                ch,
                style,
            );
        }

        if let Some(cursor) = snap.cursor {
            let (dc, dr) = self.px_to_char(cursor.offset);
            let col = gx + cursor.x as u16 * self.cell_w + dc;
            let row = gy + cursor.y as u16 * self.cell_h + dr;
            let bg = match cursor.state {
                0 => Rgb::new(250, 250, 250),
                1 => Rgb::new(250, 210, 60),
                _ => Rgb::new(80, 220, 230),
            };
            for dy in 0..self.cell_h {
                for dx in 0..self.cell_w {
                    if let Some(mut c) = fb.get(col + dx, row + dy) {
                        c.style.bg = bg;
                        c.style.fg = BLACK;
                        c.style.bold = true;
                        fb.set(col + dx, row + dy, c);
                    }
                }
            }
        }

        self.draw_panel(fb, snap, ox + self.board_w() + 2, oy);

        let overlay = match snap.screen {
            Screen::Won => Some("WELL DONE"),
            Screen::Timeout => Some("TIME IS UP"),
            _ if snap.paused => Some("PAUSED"),
            _ if snap.frozen && !snap.show_instructions => Some("PRESS ANY KEY"),
            _ => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, ox, oy, text);
        }
        if snap.frozen && snap.show_instructions {
            let top = oy + self.board_h() / 2 - INSTRUCTIONS.len() as u16 / 2;
            for (i, line) in INSTRUCTIONS.iter().enumerate() {
                fb.put_str_centered(ox, self.board_w(), top + i as u16, line, BANNER);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, x: u16, top: u16) {
        let mut y = top;
        fb.put_str(x, y, "LEVEL", LABEL);
        fb.put_u32(x + 8, y, snap.level as u32, TEXT);
        y += 1;
        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u32(x + 8, y, snap.score, TEXT);
        y += 1;
        fb.put_str(x, y, "HISCORE", LABEL);
        fb.put_u32(x + 8, y, snap.hiscore, TEXT);
        y += 1;
        fb.put_str(x, y, "TIME", LABEL);
        put_clock(fb, x + 8, y, snap.time_left_secs, TEXT);
        y += 2;

        for line in 0..snap.desc.len() {
            fb.put_str(x, y, &snap.desc_line(line), TEXT);
            y += 1;
        }
        y += 1;

        self.draw_preview(fb, &snap.solution, snap.solution_size, x, y, PANEL_W);
    }

    /// Draw a grid's bounding box one column per cell, clipped to `max_w`
    /// columns when `max_w` is non-zero.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        grid: &PackedGrid,
        size: (usize, usize),
        x: u16,
        y: u16,
        max_w: u16,
    ) {
        let (w, h) = size;
        let w = if max_w > 0 { w.min(max_w as usize) } else { w };
        for (row, cells) in grid.iter().take(h).enumerate() {
            for (col, &byte) in cells.iter().take(w).enumerate() {
                let (ch, style) = match Cell::unpack(byte) {
                    Cell::Atom(i) => atom_style(i),
                    Cell::Wall(_) => ('▓', CellStyle::new(Rgb::new(150, 150, 160), BLACK)),
                    Cell::Free | Cell::Empty => (' ', TEXT),
                };
                fb.put_char(x + col as u16, y + row as u16, ch, style);
            }
        }
    }

    fn draw_credits(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let rows = (CREDITS_VIEW_PX / CREDITS_LINE_PX) as usize;
        let first = (snap.credits_offset / CREDITS_LINE_PX) as usize;
        let top = viewport.height.saturating_sub(rows as u16) / 2;
        for (i, line) in CREDITS.iter().skip(first).take(rows).enumerate() {
            let style = if i == 0 && first == 0 { BANNER } else { TEXT };
            fb.put_str_centered(0, viewport.width, top + i as u16, line, style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        gx: u16,
        gy: u16,
        x: u16,
        y: u16,
        cell: Cell,
        floor: Rgb,
    ) {
        let (ch, style) = match cell {
            Cell::Empty => (' ', TEXT),
            Cell::Free => ('·', CellStyle::new(Rgb::new(90, 90, 110), floor).dim()),
            Cell::Wall(i) => ('▓', CellStyle::new(wall_color(i), floor)),
            Cell::Atom(i) => atom_style(i),
        };
        self.fill_at(fb, gx + x * self.cell_w, gy + y * self.cell_h, ch, style);
    }

    /// Fill one grid cell at character position `(col, row)`; the glyph
    /// goes in the first column.
    fn fill_at(&self, fb: &mut FrameBuffer, col: u16, row: u16, ch: char, style: CellStyle) {
        fb.fill_rect(col, row, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(col, row, ch, style);
    }

    fn px_to_char(&self, px: (i32, i32)) -> (u16, u16) {
        let scale = |v: i32, cell: u16| {
            let v = v * cell as i32 + TILE_SIZE / 2;
            v.div_euclid(TILE_SIZE).max(0) as u16
        };
        (scale(px.0, self.cell_w), scale(px.1, self.cell_h))
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, text: &str) {
        let mid_y = oy + self.board_h() / 2;
        let w = text.chars().count() as u16 + 4;
        let x = ox + self.board_w().saturating_sub(w) / 2;
        fb.fill_rect(x, mid_y, w, 1, ' ', BANNER);
        fb.put_str(x + 2, mid_y, text, BANNER);
    }
}

pub(crate) fn atom_style(index: u8) -> (char, CellStyle) {
    let ch = ELEMENTS[index as usize % ELEMENTS.len()];
    let bg = ATOM_COLORS[(index as usize / ELEMENTS.len()) % ATOM_COLORS.len()];
    let fg = if bg.r as u16 + bg.g as u16 + bg.b as u16 > 360 {
        BLACK
    } else {
        Rgb::new(255, 255, 255)
    };
    (ch, CellStyle::new(fg, bg).bold())
}

fn wall_color(index: u8) -> Rgb {
    let shade = 110 + (index % 6) * 20;
    Rgb::new(shade, shade, shade.saturating_add(10))
}

/// `m:ss`, minutes unpadded.
pub(crate) fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, secs: u32, style: CellStyle) {
    let minutes = secs / 60;
    let digits = if minutes >= 10 { 2 } else { 1 };
    fb.put_u32(x, y, minutes, style);
    fb.put_char(x + digits, y, ':', style);
    fb.put_u32(x + digits + 1, y, (secs % 60) / 10, style);
    fb.put_u32(x + digits + 2, y, secs % 10, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CursorSnapshot, ExplosionSnapshot};

    fn text(fb: &FrameBuffer) -> String {
        let mut out = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                out.push(fb.get(x, y).unwrap().ch);
            }
            out.push('\n');
        }
        out
    }

    fn play_snapshot() -> Snapshot {
        let mut snap = Snapshot {
            screen: Screen::Play,
            level: 3,
            score: 485,
            hiscore: 1200,
            time_left_secs: 125,
            field_size: (3, 1),
            solution_size: (2, 1),
            ..Snapshot::default()
        };
        snap.field[0] = [0; PLAY_SIZE];
        snap.field[0][0] = Cell::Wall(0).pack();
        snap.field[0][1] = Cell::Atom(1).pack();
        snap.field[0][2] = Cell::Wall(0).pack();
        snap.solution[0][0] = Cell::Atom(1).pack();
        snap.solution[0][1] = Cell::Atom(0).pack();
        snap.desc[0][..5].copy_from_slice(b"WATER");
        snap
    }

    #[test]
    fn test_play_screen_shows_hud() {
        let view = GameView::default();
        let fb = view.render(&play_snapshot(), Viewport::new(80, 24));
        let screen = text(&fb);
        assert!(screen.contains("SCORE   485"));
        assert!(screen.contains("HISCORE 1200"));
        assert!(screen.contains("TIME    2:05"));
        assert!(screen.contains("WATER"));
        assert!(screen.contains("OH"), "solution preview");
    }

    #[test]
    fn test_cursor_highlights_cell() {
        let view = GameView::default();
        let mut snap = play_snapshot();
        snap.cursor = Some(CursorSnapshot {
            x: 1,
            y: 0,
            offset: (0, 0),
            state: 1,
        });
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&snap, viewport);
        let (ox, oy) = view.origin(viewport);
        let cell = fb.get(ox + 1 + 2, oy + 1).unwrap();
        assert_eq!(cell.ch, 'O');
        assert_eq!(cell.style.bg, Rgb::new(250, 210, 60));
    }

    #[test]
    fn test_half_step_offset_moves_one_column() {
        let view = GameView::default();
        assert_eq!(view.px_to_char((8, 0)), (1, 0));
        assert_eq!(view.px_to_char((16, 16)), (2, 1));
        assert_eq!(view.px_to_char((0, 8)), (0, 1));
    }

    #[test]
    fn test_overlays() {
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);

        let mut snap = play_snapshot();
        snap.paused = true;
        assert!(text(&view.render(&snap, viewport)).contains("PAUSED"));

        snap.paused = false;
        snap.screen = Screen::Timeout;
        assert!(text(&view.render(&snap, viewport)).contains("TIME IS UP"));

        snap.screen = Screen::Won;
        snap.explosion = Some(ExplosionSnapshot { x: 1, y: 0, frame: 3 });
        let screen = text(&view.render(&snap, viewport));
        assert!(screen.contains("WELL DONE"));
        assert!(screen.contains('*'));

        snap.screen = Screen::Play;
        snap.explosion = None;
        snap.frozen = true;
        snap.show_instructions = true;
        assert!(text(&view.render(&snap, viewport)).contains("BUILD THE MOLECULE"));
    }

    #[test]
    fn test_select_screen() {
        let view = GameView::default();
        let mut snap = play_snapshot();
        snap.screen = Screen::Select;
        snap.level = 7;
        let screen = text(&view.render(&snap, Viewport::new(80, 24)));
        assert!(screen.contains("< LEVEL 07 >"));
        assert!(screen.contains("HISCORE 1200"));
        assert!(!screen.contains("COMPLETED"));

        snap.level_completed = true;
        assert!(text(&view.render(&snap, Viewport::new(80, 24))).contains("COMPLETED"));
    }

    #[test]
    fn test_intro_and_credits() {
        let view = GameView::default();
        let mut snap = Snapshot {
            slide: Some(SlideKind::Title),
            ..Snapshot::default()
        };
        assert!(text(&view.render(&snap, Viewport::new(80, 24))).contains("A  T  O  M  I  K  S"));

        snap.slide = Some(SlideKind::Info(2));
        assert!(text(&view.render(&snap, Viewport::new(80, 24))).contains("HOW TO PLAY"));

        snap.screen = Screen::Credits;
        assert!(text(&view.render(&snap, Viewport::new(80, 24))).contains(CREDITS[0]));
        snap.credits_offset = 2 * CREDITS_LINE_PX;
        assert!(text(&view.render(&snap, Viewport::new(80, 24))).contains(CREDITS[2]));
    }

    #[test]
    fn test_too_small() {
        let fb = GameView::default().render(&play_snapshot(), Viewport::new(30, 10));
        assert!(text(&fb).contains("TERMINAL TOO SMALL"));
    }
}
