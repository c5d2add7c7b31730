//! TerminalRenderer: puts frames on the terminal.
//!
//! Frames are diffed against what is currently on screen and only the runs
//! of changed cells are rewritten. The renderer also tracks the terminal
//! size (updated from resize events) and keeps the last regular frame as
//! the backdrop the exit fade darkens.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use log::debug;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Used when the terminal cannot report its size.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    size: (u16, u16),
    /// What the terminal shows right now; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    backdrop: FrameBuffer,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), FALLBACK_SIZE)
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, size: (u16, u16)) -> Self {
        Self {
            out,
            size,
            shown: None,
            backdrop: FrameBuffer::new(0, 0),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen, titled `title`.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.size = terminal::size().unwrap_or(FALLBACK_SIZE);
        debug!("terminal is {}x{}", self.size.0, self.size.1);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to restore the terminal")?;
        Ok(())
    }

    /// The area views should draw into.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.size.0, self.size.1)
    }

    /// Record a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!("terminal resized to {}x{}", width, height);
        self.size = (width, height);
        self.shown = None;
    }

    /// Show `fb` and remember it as the fade backdrop.
    ///
    /// `fb` is swapped with the previously shown frame, so callers keep one
    /// buffer and redraw it from scratch every frame.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.backdrop.clone_from(fb);
        self.show(fb)
    }

    /// Show the last presented frame darkened by `alpha` (255 is black).
    /// `scratch` is overwritten.
    pub fn present_faded(&mut self, alpha: u8, scratch: &mut FrameBuffer) -> Result<()> {
        scratch.clone_from(&self.backdrop);
        scratch.fade(alpha);
        self.show(scratch)
    }

    fn show(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let mut prev = self.shown.take().unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out
            .write_all(&self.buf)
            .and_then(|()| self.out.flush())
            .context("failed to write to the terminal")
    }
}

/// Encode `next` as terminal commands into `out`.
///
/// Without a previous frame of the same size the screen is cleared and
/// every row is written; otherwise only changed runs are.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let mut from = 0;
        while let Some((start, len)) = next_run(prev, next, y, from) {
            out.queue(cursor::MoveTo(start, y))?;
            for x in start..start + len {
                pen.paint(out, next.get(x, y).unwrap_or_default())?;
            }
            from = start + len;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// The next run of changed cells in row `y`, starting at or after `from`.
fn next_run(prev: Option<&FrameBuffer>, next: &FrameBuffer, y: u16, from: u16) -> Option<(u16, u16)> {
    let changed = |x: u16| prev.map_or(true, |p| p.get(x, y) != next.get(x, y));
    let start = (from..next.width()).find(|&x| changed(x))?;
    let end = (start..next.width())
        .find(|&x| !changed(x))
        .unwrap_or(next.width());
    Some((start, end - start))
}

/// Current terminal style; only emits style commands when it changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn paint(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(color(style.fg)))?;
            out.queue(SetBackgroundColor(color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
