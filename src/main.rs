//! Atomiks terminal runner (default binary).
//!
//! Resolves configuration, checks the asset directory, then drives the
//! core [`Controller`] at a fixed 16ms tick. Each frame:
//! pending transition -> input -> update -> render.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};

use atomiks::core::{Config, ConfigArgs, Controller, DiskStorage, SimpleRng, Storage};
use atomiks::input::map_key;
use atomiks::logging;
use atomiks::term::{
    fingerprint, is_static, FrameBuffer, GameView, RenderThrottle, TerminalAudio,
    TerminalRenderer,
};
use atomiks::types::{Command, Screen, TICK_MS};

const STATIC_REDRAW_MS: u64 = 250;

/// Slide atoms into the target molecule before time runs out.
#[derive(Debug, Parser)]
#[command(name = "atomiks", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    let config = Cli::parse().config.resolve();
    logging::init(&config.log_path())?;

    let levels = config.levels_dir();
    if !levels.is_dir() {
        bail!(
            "level directory {} not found (set ATOMIKS_ASSETS or pass --assets)",
            levels.display()
        );
    }
    if config.fullscreen {
        info!("fullscreen requested; the terminal decides its own size");
    }

    let storage = DiskStorage::new(&config);
    let progress = storage.load_progress();
    info!(
        "starting with {} unlocked, assets at {}",
        progress.max_auth_level(),
        config.assets_dir.display()
    );
    let game = Controller::new(
        storage,
        progress,
        config.rules(),
        SimpleRng::from_clock(),
        Instant::now(),
    );

    let mut term = TerminalRenderer::new();
    term.enter("Atomiks")?;

    let result = run(&mut term, game, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}

fn run(term: &mut TerminalRenderer, mut game: Controller<DiskStorage>, config: &Config) -> Result<()> {
    let view = GameView::default();
    let mut audio = TerminalAudio::new(io::stdout(), config.sound);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        if let Some(screen) = game.apply_pending(now) {
            throttle.reset();
            debug!("entered {}", screen.as_str());
        }

        // Input with timeout until next tick.
        let mut wait = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        drain_events(&mut game, term, &mut throttle, || {
            let ready = event::poll(wait).context("failed to poll terminal events")?;
            wait = Duration::ZERO;
            if !ready {
                return Ok(None);
            }
            event::read()
                .map(Some)
                .context("failed to read terminal event")
        })?;

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.update(last_tick);
            for cue in game.drain_cues() {
                if let Err(err) = audio.play(cue) {
                    warn!("audio cue {:?} failed: {:#}", cue, err);
                }
            }
        }

        if game.finished() {
            info!("bye");
            return Ok(());
        }

        // Render.
        let now = Instant::now();
        let snap = game.snapshot(now);
        let elapsed_ms = now.duration_since(started).as_millis() as u64;
        if !throttle.should_render(elapsed_ms, fingerprint(&snap), is_static(&snap)) {
            continue;
        }
        if snap.screen == Screen::Exit {
            term.present_faded(snap.fade_alpha, &mut fb)?;
        } else {
            view.render_into(&snap, term.viewport(), &mut fb);
            term.present(&mut fb)?;
        }
    }
}

/// Feed queued terminal events to the game until `next` reports the queue
/// is empty.
fn drain_events<S: Storage, W: Write>(
    game: &mut Controller<S>,
    term: &mut TerminalRenderer<W>,
    throttle: &mut RenderThrottle,
    mut next: impl FnMut() -> Result<Option<Event>>,
) -> Result<()> {
    while let Some(ev) = next()? {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_interrupt(&key) {
                    if game.screen() != Screen::Exit {
                        game.request_transition(Screen::Exit);
                    }
                    continue;
                }
                match map_key(key) {
                    Command::Fullscreen => {
                        debug!("fullscreen toggle ignored in a terminal");
                    }
                    cmd => game.handle(cmd, Instant::now()),
                }
            }
            Event::Resize(w, h) => {
                term.resize(w, h);
                throttle.reset();
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
