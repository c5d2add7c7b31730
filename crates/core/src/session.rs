//! Game session - one attempt at one level
//!
//! Owns the live field, the mover, score and the level clock. A session is
//! built fresh every time a level is entered; nothing carries over.
//!
//! The clock does not run until [`GameSession::start_clock`] is called (the
//! first input after entering the level). Pausing snapshots the remaining
//! time; resuming sets a new deadline from that snapshot.

use std::time::{Duration, Instant};

use crate::grid::Grid;
use crate::level::Level;
use crate::movement::{Cursor, LooseTile, MoveStart, Mover, Settled};
use crate::types::{Direction, MOVE_PENALTY, START_SCORE};
use crate::win;

#[derive(Debug, Clone)]
pub struct GameSession {
    level_no: u8,
    level: Level,
    mover: Mover,
    score: u32,
    hiscore: u32,
    duration: Duration,
    deadline: Option<Instant>,
    paused: bool,
    pause_left: Duration,
    no_lose: bool,
}

impl GameSession {
    pub fn new(level_no: u8, level: Level, hiscore: u32, no_lose: bool) -> Self {
        let mover = Mover::new(level.start_cell(), level.cursor_type);
        let duration = Duration::from_secs(level.duration_secs as u64);
        Self {
            level_no,
            level,
            mover,
            score: START_SCORE,
            hiscore,
            duration,
            deadline: None,
            paused: false,
            pause_left: Duration::ZERO,
            no_lose,
        }
    }

    pub fn level_no(&self) -> u8 {
        self.level_no
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn field(&self) -> &Grid {
        &self.level.field
    }

    pub fn solution(&self) -> &Grid {
        &self.level.solution
    }

    pub fn cursor(&self) -> &Cursor {
        self.mover.cursor()
    }

    pub fn loose(&self) -> Option<&LooseTile> {
        self.mover.loose()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hiscore(&self) -> u32 {
        self.hiscore
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Entered but no input yet: the clock is not running.
    pub fn is_frozen(&self) -> bool {
        self.deadline.is_none()
    }

    pub fn in_flight(&self) -> bool {
        self.mover.in_flight()
    }

    pub fn start_clock(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    /// Toggle pause. Returns the new paused state.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return self.paused;
        };
        self.paused = !self.paused;
        if self.paused {
            self.pause_left = deadline.saturating_duration_since(now);
        } else {
            self.deadline = Some(now + self.pause_left);
        }
        self.paused
    }

    /// Time shown on the HUD.
    pub fn time_left(&self, now: Instant) -> Duration {
        match self.deadline {
            None => self.duration,
            Some(_) if self.no_lose => self.duration,
            Some(_) if self.paused => self.pause_left,
            Some(deadline) => deadline.saturating_duration_since(now),
        }
    }

    /// Past the deadline with losing enabled. Never true while frozen or paused.
    pub fn is_timed_out(&self, now: Instant) -> bool {
        if self.no_lose || self.paused {
            return false;
        }
        matches!(self.deadline, Some(deadline) if now > deadline)
    }

    /// Forward a directional command to the mover; slides cost points.
    pub fn command(&mut self, dir: Direction) -> Option<MoveStart> {
        let started = self.mover.command(&mut self.level.field, dir)?;
        if matches!(started, MoveStart::Slide { .. }) && !self.no_lose {
            self.score = self.score.saturating_sub(MOVE_PENALTY);
        }
        Some(started)
    }

    pub fn toggle_pickup(&mut self) -> Option<bool> {
        self.mover.toggle_pickup(&self.level.field)
    }

    pub fn advance(&mut self) -> Option<Settled> {
        self.mover.tick(&mut self.level.field)
    }

    /// Solution present in the field with nothing in flight.
    pub fn is_won(&self) -> bool {
        !self.mover.in_flight() && win::is_won(&self.level.field, &self.level.solution)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Raise the session hiscore to the current score if it is at least as high.
    pub fn settle_hiscore(&mut self) -> bool {
        if self.score >= self.hiscore {
            self.hiscore = self.score;
            return true;
        }
        false
    }

    pub(crate) fn field_mut(&mut self) -> &mut Grid {
        &mut self.level.field
    }
}
