//! Key mapping from terminal events to commands.
//!
//! Keypad digits only count as directions when the terminal reports them
//! as keypad keys (`KeyEventState::KEYPAD`); plain digits are unknown.

use crate::types::{Command, Direction, EditorCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

/// Map a key press to a game command.
///
/// Alt+Enter toggles fullscreen; every other Alt chord is swallowed, as are
/// bare modifier keys.
pub fn map_key(key: KeyEvent) -> Command {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let keypad = key.state.contains(KeyEventState::KEYPAD);

    let cmd = match key.code {
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Enter if alt => return Command::Fullscreen,
        KeyCode::Enter => Command::Enter,
        KeyCode::Home => Command::Home,
        KeyCode::End => Command::End,
        KeyCode::Esc => Command::Esc,
        KeyCode::Char(' ') => Command::Space,
        KeyCode::Char(c) if keypad => keypad_command(c),
        KeyCode::Modifier(_) => Command::None,
        _ => Command::Unknown,
    };

    if alt {
        return Command::None;
    }
    cmd
}

fn keypad_command(c: char) -> Command {
    match c {
        '4' => Command::Move(Direction::Left),
        '6' => Command::Move(Direction::Right),
        '8' => Command::Move(Direction::Up),
        '2' => Command::Move(Direction::Down),
        '5' => Command::Enter,
        '7' => Command::Home,
        '1' => Command::End,
        _ => Command::Unknown,
    }
}

/// Map a key press to a level editor command.
pub fn map_editor_key(key: KeyEvent) -> Option<EditorCommand> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(EditorCommand::Quit);
    }

    let cmd = match key.code {
        KeyCode::Esc => EditorCommand::Quit,
        KeyCode::Left => EditorCommand::Move(Direction::Left),
        KeyCode::Right => EditorCommand::Move(Direction::Right),
        KeyCode::Up => EditorCommand::Move(Direction::Up),
        KeyCode::Down => EditorCommand::Move(Direction::Down),
        KeyCode::Char(' ') => EditorCommand::CycleVariant,
        KeyCode::Insert => EditorCommand::Stamp,
        KeyCode::Enter => EditorCommand::CycleKind,
        KeyCode::Delete => EditorCommand::Erase,
        KeyCode::Tab => EditorCommand::ToggleView,
        KeyCode::Char('-') => EditorCommand::DurationDown,
        KeyCode::Char('+') | KeyCode::Char('=') => EditorCommand::DurationUp,
        KeyCode::F(1) => EditorCommand::NextDescSlot,
        KeyCode::F(2) => EditorCommand::CycleCursorType,
        KeyCode::F(3) => EditorCommand::CycleBackground,
        KeyCode::F(5) => EditorCommand::Save,
        KeyCode::Char(c) if c.is_ascii_alphabetic() || c == '.' => {
            EditorCommand::Char(c.to_ascii_uppercase() as u8)
        }
        _ => return None,
    };
    Some(cmd)
}
