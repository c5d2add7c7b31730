//! Progression controller - the top-level screen state machine
//!
//! ```text
//! Intro -> Select <-> Play -> Won -> Select (next level) | Credits -> Select
//!                          -> Timeout -> Select
//! Select/Intro -> Exit -> finished
//! ```
//!
//! Transitions are requested with [`Controller::request_transition`] and only
//! take effect in [`Controller::apply_pending`], which the loop calls once at
//! the start of every frame. Nothing switches screens in the middle of a
//! frame.
//!
//! All entry points take the current `Instant`; the controller never reads
//! the clock itself.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::config::Rules;
use crate::level::Level;
use crate::progress::Progress;
use crate::rng::SimpleRng;
use crate::session::GameSession;
use crate::slideshow::Slideshow;
use crate::snapshot::{
    pack_grid, CursorSnapshot, ExplosionSnapshot, LooseSnapshot, Snapshot,
};
use crate::storage::Storage;
use crate::types::{
    Cell, Command, Cue, Screen, CREDITS, CREDITS_LINE_PX, CREDITS_VIEW_PX, EXPLOSION_FRAMES,
    EXPLOSION_FRAME_MS, LEVEL_COUNT, PLAY_SIZE, WIN_BONUS_PER_SECOND, WIN_BONUS_STEPS_PER_TICK,
};

const MAX_CUES: usize = 16;

/// Explosion queue and bonus tally run after a level is won.
#[derive(Debug, Clone)]
struct WinSequence {
    /// Atoms still to explode; the last entry is the one exploding.
    queue: ArrayVec<(usize, usize), { PLAY_SIZE * PLAY_SIZE }>,
    frame: u8,
    next_frame_at: Instant,
    /// Bonus clock: starts at the moment of the win and runs one second
    /// per tally step until it passes the level deadline.
    tally: Instant,
    done: bool,
}

pub struct Controller<S: Storage> {
    storage: S,
    progress: Progress,
    rules: Rules,
    screen: Screen,
    pending: Option<Screen>,
    /// Level shown in the selector / being played.
    level: u8,
    preview: Level,
    session: Option<GameSession>,
    slides: Slideshow,
    win: Option<WinSequence>,
    credits_offset: u32,
    show_cursor: bool,
    cues: ArrayVec<Cue, MAX_CUES>,
    rng: SimpleRng,
    finished: bool,
}

impl<S: Storage> Controller<S> {
    /// Build the controller and enter the intro.
    pub fn new(storage: S, progress: Progress, rules: Rules, rng: SimpleRng, now: Instant) -> Self {
        let mut controller = Self {
            storage,
            progress,
            rules,
            screen: Screen::Intro,
            pending: None,
            level: 1,
            preview: Level::blank(),
            session: None,
            slides: Slideshow::intro(now),
            win: None,
            credits_offset: 0,
            show_cursor: false,
            cues: ArrayVec::new(),
            rng,
            finished: false,
        };
        controller.enter(Screen::Intro, now);
        controller
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn pending(&self) -> Option<Screen> {
        self.pending
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> &Level {
        &self.preview
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The exit fade has completed; the process should terminate.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Ask for a screen change at the start of the next frame.
    pub fn request_transition(&mut self, to: Screen) {
        self.pending = Some(to);
    }

    /// Apply a pending transition, if any. Returns the screen entered.
    pub fn apply_pending(&mut self, now: Instant) -> Option<Screen> {
        let to = self.pending.take()?;
        self.enter(to, now);
        Some(to)
    }

    /// Drain queued audio cues.
    pub fn drain_cues(&mut self) -> ArrayVec<Cue, MAX_CUES> {
        std::mem::take(&mut self.cues)
    }

    fn cue(&mut self, cue: Cue) {
        if self.cues.try_push(cue).is_err() {
            debug!("cue queue full, dropping {:?}", cue);
        }
    }

    fn enter(&mut self, to: Screen, now: Instant) {
        debug!("screen {} -> {}", self.screen.as_str(), to.as_str());
        self.screen = to;
        match to {
            Screen::Intro => {
                self.level = 1;
                self.slides = Slideshow::intro(now);
                self.cue(Cue::MusicTitle);
            }
            Screen::Select => {
                self.session = None;
                self.win = None;
                self.preview = self.storage.load_level(self.level);
            }
            Screen::Play => {
                self.cue(Cue::MusicFadeOut);
                self.show_cursor = true;
                let level = self.storage.load_level(self.level);
                let hiscore = self.progress.hiscore(self.level);
                self.session = Some(GameSession::new(
                    self.level,
                    level,
                    hiscore,
                    self.rules.no_lose,
                ));
                info!("playing level {}", self.level);
            }
            Screen::Won => self.enter_won(now),
            Screen::Timeout => {
                info!("level {} timed out", self.level);
            }
            Screen::Credits => {
                self.credits_offset = 0;
                self.cue(Cue::MusicEnd);
            }
            Screen::Exit => {
                self.slides = Slideshow::exit_fade(now);
            }
        }
    }

    fn enter_won(&mut self, now: Instant) {
        if self.progress.complete_level(self.level) {
            info!("unlocked level {}", self.progress.max_auth_level());
        }

        let mut queue = ArrayVec::new();
        if let Some(session) = &self.session {
            queue.extend(session.field().atoms());
        }
        self.rng.shuffle(&mut queue);
        if !queue.is_empty() {
            self.cue(Cue::Explode);
        }

        self.win = Some(WinSequence {
            queue,
            frame: 0,
            next_frame_at: now + Duration::from_millis(EXPLOSION_FRAME_MS),
            tally: now,
            done: false,
        });
        self.show_cursor = false;
    }

    /// Interpret one input command for the current screen.
    pub fn handle(&mut self, cmd: Command, now: Instant) {
        if matches!(cmd, Command::None | Command::Fullscreen) {
            return;
        }
        match self.screen {
            Screen::Intro | Screen::Exit => self.slides.event(cmd),
            Screen::Select => self.handle_select(cmd),
            Screen::Play => self.handle_play(cmd, now),
            Screen::Won => {
                if cmd == Command::Esc {
                    self.request_transition(Screen::Select);
                }
            }
            Screen::Timeout => self.request_transition(Screen::Select),
            Screen::Credits => {
                if matches!(cmd, Command::Esc | Command::Enter) {
                    self.request_transition(Screen::Select);
                }
            }
        }
    }

    /// Highest level the selector may reach.
    fn selectable_max(&self) -> u8 {
        if self.rules.unlocked {
            LEVEL_COUNT
        } else {
            self.progress.max_auth_level().min(LEVEL_COUNT)
        }
    }

    fn handle_select(&mut self, cmd: Command) {
        use crate::types::Direction;

        let old = self.level;
        match cmd {
            Command::Esc => self.request_transition(Screen::Exit),
            Command::Move(Direction::Left) => {
                if self.level > 1 {
                    self.level -= 1;
                }
            }
            Command::Move(Direction::Right) => {
                if self.level < self.selectable_max() {
                    self.level += 1;
                }
            }
            Command::Home => self.level = 1,
            Command::End => self.level = self.selectable_max(),
            Command::Enter => self.request_transition(Screen::Play),
            _ => {}
        }

        if self.level != old {
            self.preview = self.storage.load_level(self.level);
        }
    }

    fn handle_play(&mut self, cmd: Command, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.is_frozen() {
            if cmd == Command::Esc {
                self.request_transition(Screen::Select);
            } else {
                session.start_clock(now);
            }
            return;
        }

        if cmd == Command::Space {
            session.toggle_pause(now);
        }
        if session.paused() {
            return;
        }

        match cmd {
            Command::Esc => self.request_transition(Screen::Select),
            Command::Move(dir) => {
                if let Some(crate::movement::MoveStart::Slide { .. }) = session.command(dir) {
                    self.cue(Cue::SlideStart);
                }
            }
            Command::Enter => {
                if session.toggle_pickup() == Some(true) {
                    self.cue(Cue::Pickup);
                }
            }
            _ => {}
        }
    }

    /// Advance one logical frame.
    pub fn update(&mut self, now: Instant) {
        match self.screen {
            Screen::Intro => {
                if self.slides.update(now) {
                    let next = if self.slides.quit() {
                        Screen::Exit
                    } else {
                        Screen::Select
                    };
                    self.request_transition(next);
                }
            }
            Screen::Play => self.update_play(now),
            Screen::Won => self.update_won(now),
            Screen::Credits => {
                let content = CREDITS.len() as u32 * CREDITS_LINE_PX;
                if self.credits_offset + CREDITS_VIEW_PX < content {
                    self.credits_offset += 1;
                }
            }
            Screen::Exit => {
                if self.slides.update(now) && !self.finished {
                    self.finished = true;
                    self.persist();
                }
            }
            Screen::Select | Screen::Timeout => {}
        }
    }

    fn update_play(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.paused() || session.is_frozen() {
            return;
        }

        if session.is_timed_out(now) {
            self.request_transition(Screen::Timeout);
            return;
        }

        let was_sliding = session.loose().is_some();
        if session.in_flight() {
            if session.advance().is_some() && was_sliding {
                self.cue(Cue::SlideStop);
            }
        } else if session.is_won() {
            info!("level {} solved", self.level);
            self.request_transition(Screen::Won);
        }
    }

    fn update_won(&mut self, now: Instant) {
        let Some(win) = self.win.as_mut() else {
            return;
        };

        if !win.queue.is_empty() {
            if now <= win.next_frame_at {
                return;
            }
            win.next_frame_at = now + Duration::from_millis(EXPLOSION_FRAME_MS);
            win.frame += 1;
            if win.frame < EXPLOSION_FRAMES {
                return;
            }

            win.frame = 0;
            if let Some((x, y)) = win.queue.pop() {
                if let Some(session) = self.session.as_mut() {
                    session.field_mut().set(x, y, Cell::Free);
                }
            }
            if !win.queue.is_empty() {
                self.cue(Cue::Explode);
            }
            return;
        }

        if win.done {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let deadline = session.deadline().unwrap_or(win.tally);
        for _ in 0..WIN_BONUS_STEPS_PER_TICK {
            session.add_score(WIN_BONUS_PER_SECOND);
            win.tally += Duration::from_secs(1);
            if win.tally > deadline {
                win.done = true;
                break;
            }
        }
        if !win.done {
            return;
        }

        if session.settle_hiscore() {
            self.progress.record_hiscore(self.level, session.hiscore());
        }
        let next = if self.level >= LEVEL_COUNT {
            Screen::Credits
        } else {
            self.level += 1;
            Screen::Select
        };
        self.persist();
        self.request_transition(next);
    }

    /// Save progress; failures are logged and play continues.
    pub fn persist(&mut self) {
        match self.storage.save_progress(&self.progress) {
            Ok(()) => info!("saved progress"),
            Err(err) => warn!("failed to save progress: {:#}", err),
        }
    }

    /// Plain-data view of the current frame for the presentation layer.
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let mut snap = Snapshot {
            screen: self.screen,
            level: self.level,
            max_auth_level: self.progress.max_auth_level(),
            level_completed: self.level < self.progress.max_auth_level() || self.rules.unlocked,
            credits_offset: self.credits_offset,
            ..Snapshot::default()
        };

        match self.screen {
            Screen::Intro | Screen::Exit => {
                snap.slide = self.slides.current().map(|s| s.kind);
                if let Some(crate::slideshow::SlideKind::Fade(alpha)) = snap.slide {
                    snap.fade_alpha = alpha;
                }
                if self.screen == Screen::Exit && snap.slide.is_none() {
                    snap.fade_alpha = 255;
                }
            }
            Screen::Select => {
                pack_grid(&self.preview.solution, &mut snap.solution);
                snap.solution_size = (self.preview.solution.width(), self.preview.solution.height());
                snap.desc = self.preview.desc;
                snap.hiscore = self.progress.hiscore(self.level);
            }
            Screen::Play | Screen::Won | Screen::Timeout | Screen::Credits => {}
        }

        let Some(session) = self.session.as_ref() else {
            return snap;
        };
        if !matches!(self.screen, Screen::Play | Screen::Won | Screen::Timeout) {
            return snap;
        }

        let level = session.level();
        pack_grid(&level.field, &mut snap.field);
        snap.field_size = (level.field.width(), level.field.height());
        pack_grid(&level.solution, &mut snap.solution);
        snap.solution_size = (level.solution.width(), level.solution.height());
        snap.desc = level.desc;
        snap.background = level.background;
        snap.score = session.score();
        snap.hiscore = session.hiscore();
        snap.paused = session.paused();
        snap.frozen = session.is_frozen();
        snap.show_instructions =
            snap.frozen && self.level == 1 && self.progress.max_auth_level() == 1;

        let time_at = match &self.win {
            Some(win) if self.screen == Screen::Won => win.tally,
            _ => now,
        };
        snap.time_left_secs = session.time_left(time_at).as_secs() as u32;

        if self.show_cursor {
            let c = session.cursor();
            snap.cursor = Some(CursorSnapshot {
                x: c.x,
                y: c.y,
                offset: c.offset,
                state: c.state,
            });
        }
        snap.loose = session.loose().map(|l| LooseSnapshot {
            atom: l.atom,
            pos: l.pos,
        });
        if let Some(win) = &self.win {
            if let Some(&(x, y)) = win.queue.last() {
                snap.explosion = Some(ExplosionSnapshot {
                    x,
                    y,
                    frame: win.frame,
                });
            }
        }
        snap
    }
}
