//! Atomiks level editor.
//!
//! usage: atomiks-editor [--assets <dir>] [--pref <dir>] <level>
//!
//! Edits `<assets>/lev/levNNNN.dat` in place; F5 saves, Esc quits without
//! saving.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use atomiks::core::{ConfigArgs, LevelEditor, LevelStore};
use atomiks::input::map_editor_key;
use atomiks::logging;
use atomiks::term::{CellStyle, EditorView, FrameBuffer, TerminalRenderer};
use atomiks::types::{EditorCommand, LEVEL_COUNT, TICK_MS};

/// Edit an Atomiks level file in place.
#[derive(Debug, Parser)]
#[command(name = "atomiks-editor", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Level number to edit.
    #[arg(value_parser = clap::value_parser!(u8).range(1..))]
    level: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli.level;
    let config = cli.config.resolve();

    logging::init(&config.log_path())?;
    if level > LEVEL_COUNT {
        warn!("level {} is beyond the {} the game plays", level, LEVEL_COUNT);
    }

    let dir = config.levels_dir();
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let store = LevelStore::new(dir);
    let editor = LevelEditor::open(&store, level);
    info!("editing level {} in {}", level, store.dir().display());

    let mut term = TerminalRenderer::new();
    term.enter("Atomiks level editor")?;

    let result = run(&mut term, editor, &store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut editor: LevelEditor, store: &LevelStore) -> Result<()> {
    let view = EditorView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut status: &str = "";
    let mut dirty = true;

    while !editor.quit() {
        if dirty {
            let viewport = term.viewport();
            view.render_into(&editor, viewport, &mut fb);
            fb.put_str(0, viewport.height.saturating_sub(1), status, CellStyle::default().bold());
            term.present(&mut fb)?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(TICK_MS as u64))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(cmd) = map_editor_key(key) else {
                    continue;
                };
                status = match (cmd, editor.apply(cmd, store)) {
                    (EditorCommand::Save, Ok(())) => "SAVED",
                    (_, Err(_)) => "SAVE FAILED, SEE LOG",
                    _ => "",
                };
                dirty = true;
            }
            Event::Resize(w, h) => {
                term.resize(w, h);
                dirty = true;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("atomiks-editor").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_argument() {
        assert_eq!(parse(&["7"]).unwrap().level, 7);
        assert_eq!(parse(&["--assets", "a", "255"]).unwrap().level, 255);
        assert!(parse(&[]).is_err());
        assert!(parse(&["0"]).is_err());
        assert!(parse(&["256"]).is_err());
        assert!(parse(&["x"]).is_err());
        assert!(parse(&["1", "2"]).is_err());
    }
}
