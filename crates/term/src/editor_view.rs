//! EditorView: draws the level editor.

use crate::core::{EditorView as View, LevelEditor};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{
    atom_style, put_clock, GameView, Viewport, BACKGROUNDS, BANNER, BORDER, HINT, LABEL, TEXT,
};
use crate::types::{Cell, DESC_LEN, PLAY_SIZE};

const HELP: [&str; 7] = [
    "SPC VARIANT  RET KIND",
    "INS STAMP    DEL ERASE",
    "TAB VIEW     -/+ TIME",
    "F1 NEXT CHAR F2 CURSOR",
    "F3 BG        F5 SAVE",
    "A-Z TYPE     . CLEAR",
    "ESC QUIT",
];

const SLOT: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(48, 48, 48));
const SLOT_ACTIVE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 0, 0)).bold();

#[derive(Default)]
pub struct EditorView {
    grid: GameView,
}

impl EditorView {
    pub fn render_into(&self, editor: &LevelEditor, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.into_cell(' '));

        let min = self.grid.min_viewport();
        if viewport.width < min.width || viewport.height < min.height {
            fb.put_str(0, 0, "TERMINAL TOO SMALL", LABEL);
            return;
        }

        let (ox, oy) = self.grid.origin(viewport);
        let level = editor.level();
        let grid = match editor.view() {
            View::Field => &level.field,
            View::Solution => &level.solution,
        };
        let floor = BACKGROUNDS[(level.background as usize).min(BACKGROUNDS.len() - 1)];

        fb.draw_border(ox, oy, self.grid.board_w(), self.grid.board_h(), BORDER);
        for y in 0..PLAY_SIZE {
            for x in 0..PLAY_SIZE {
                self.grid
                    .draw_cell(fb, ox + 1, oy + 1, x as u16, y as u16, grid.at(x, y), floor);
            }
        }

        // Cursor: invert the cell under it.
        let (cx, cy) = editor.cursor();
        let col = ox + 1 + cx as u16 * 2;
        let row = oy + 1 + cy as u16;
        for dx in 0..2 {
            if let Some(mut c) = fb.get(col + dx, row) {
                c.style = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(250, 250, 250)).bold();
                fb.set(col + dx, row, c);
            }
        }

        let x = ox + self.grid.board_w() + 2;
        let mut y = oy;
        fb.put_str(x, y, "LEVEL", LABEL);
        fb.put_u32(x + 8, y, editor.number() as u32, TEXT);
        y += 1;
        let view = match editor.view() {
            View::Field => "FIELD",
            View::Solution => "SOLUTION",
        };
        fb.put_str(x, y, view, BANNER);
        y += 1;
        fb.put_str(x, y, "TIME", LABEL);
        put_clock(fb, x + 8, y, level.duration_secs as u32, TEXT);
        y += 1;
        fb.put_str(x, y, "CURSOR", LABEL);
        fb.put_u32(x + 8, y, level.cursor_type as u32, TEXT);
        y += 1;
        fb.put_str(x, y, "BG", LABEL);
        fb.put_u32(x + 8, y, level.background as u32, TEXT);
        y += 1;
        fb.put_str(x, y, "ITEM", LABEL);
        let (ch, style) = match editor.item() {
            Cell::Atom(i) => atom_style(i),
            Cell::Wall(_) => ('▓', TEXT),
            Cell::Free => ('·', TEXT),
            Cell::Empty => ('-', TEXT),
        };
        fb.put_char(x + 8, y, ch, style);
        y += 2;

        let (active_line, active_char) = editor.desc_slot();
        for (line, chars) in level.desc.iter().enumerate() {
            for (i, &b) in chars.iter().enumerate().take(DESC_LEN) {
                let style = if line == active_line && i == active_char {
                    SLOT_ACTIVE
                } else {
                    SLOT
                };
                let ch = if b.is_ascii_uppercase() { b as char } else { ' ' };
                fb.put_char(x + i as u16, y, ch, style);
            }
            y += 1;
        }
        y += 1;

        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, HINT);
            y += 1;
        }
    }

    pub fn render(&self, editor: &LevelEditor, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(editor, viewport, &mut fb);
        fb
    }
}
