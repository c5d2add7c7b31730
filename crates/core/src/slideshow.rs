//! Slideshows: the intro sequence and the exit fade.
//!
//! A slide with a duration advances on its own; one without waits for a
//! key. Input is only accepted when the show was built to accept it.

use std::time::{Duration, Instant};

use crate::types::{
    Command, EXIT_FADE_ALPHA_STEP, EXIT_FADE_STEPS, EXIT_FADE_STEP_MS, TITLE_SLIDE_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Title,
    /// One of the instruction pages.
    Info(u8),
    /// Darken the last frame by `alpha` (0..=255).
    Fade(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub kind: SlideKind,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Slideshow {
    slides: Vec<Slide>,
    index: usize,
    started: Instant,
    advance: bool,
    accepts_input: bool,
    quit: bool,
}

impl Slideshow {
    pub fn new(slides: Vec<Slide>, accepts_input: bool, now: Instant) -> Self {
        Self {
            slides,
            index: 0,
            started: now,
            advance: false,
            accepts_input,
            quit: false,
        }
    }

    /// Title (timed) followed by three instruction pages.
    pub fn intro(now: Instant) -> Self {
        let mut slides = vec![Slide {
            kind: SlideKind::Title,
            duration: Some(Duration::from_millis(TITLE_SLIDE_MS)),
        }];
        slides.extend((0..3).map(|page| Slide {
            kind: SlideKind::Info(page),
            duration: None,
        }));
        Self::new(slides, true, now)
    }

    /// Fade to black over `EXIT_FADE_STEPS` timed steps; ignores input.
    pub fn exit_fade(now: Instant) -> Self {
        let slides = (0..EXIT_FADE_STEPS as u16)
            .map(|i| Slide {
                kind: SlideKind::Fade((i * EXIT_FADE_ALPHA_STEP).min(255) as u8),
                duration: Some(Duration::from_millis(EXIT_FADE_STEP_MS)),
            })
            .collect();
        Self::new(slides, false, now)
    }

    /// ESC skips the whole show and marks it as quit; any other key
    /// advances one slide.
    pub fn event(&mut self, cmd: Command) {
        if !self.accepts_input {
            return;
        }
        if cmd == Command::Esc {
            self.index = self.slides.len();
            self.quit = true;
        } else {
            self.advance = true;
        }
    }

    /// Step the show. Returns true once every slide has been shown.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(slide) = self.slides.get(self.index) else {
            return true;
        };

        if let Some(d) = slide.duration {
            if now > self.started + d {
                self.advance = true;
            }
        }

        if self.advance {
            self.advance = false;
            self.index += 1;
            self.started = now;
        }
        false
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn quit(&self) -> bool {
        self.quit
    }
}
