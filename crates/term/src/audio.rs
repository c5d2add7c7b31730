//! Audio cues on a terminal: short effects ring the bell, music is logged.
//!
//! The core only emits [`Cue`]s; whether and how they are heard is decided
//! here. With sound disabled every cue is dropped.

use std::io::Write;

use anyhow::Result;
use log::debug;

use crate::types::Cue;

const BEL: u8 = 0x07;

pub struct TerminalAudio<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Play one cue. Returns whether anything was emitted.
    pub fn play(&mut self, cue: Cue) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        match cue {
            Cue::Pickup | Cue::Explode => {
                self.out.write_all(&[BEL])?;
                self.out.flush()?;
                Ok(true)
            }
            Cue::SlideStart | Cue::SlideStop => Ok(false),
            Cue::MusicTitle | Cue::MusicEnd | Cue::MusicFadeOut => {
                debug!("music cue {:?}", cue);
                Ok(false)
            }
        }
    }

    pub fn play_all(&mut self, cues: impl IntoIterator<Item = Cue>) -> Result<()> {
        for cue in cues {
            self.play(cue)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
