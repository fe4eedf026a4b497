//! Key bindings: WASD + space, with arrow-key and vim aliases.

use crate::game::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
    None,
}

/// Map key event to a command. Ticks never come from the keyboard.
pub fn key_to_command(key: KeyEvent) -> Command {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Command::Quit;
    }
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return Command::None;
    }
    let action = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Command::Quit,
        KeyCode::Char('a' | 'A' | 'h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('d' | 'D' | 'l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('s' | 'S' | 'j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('w' | 'W' | 'k') | KeyCode::Up => Action::Rotate,
        KeyCode::Char(' ') | KeyCode::Enter => Action::Restart,
        _ => return Command::None,
    };
    Command::Game(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_space() {
        assert_eq!(key_to_command(key(KeyCode::Char('a'))), Command::Game(Action::MoveLeft));
        assert_eq!(key_to_command(key(KeyCode::Char('d'))), Command::Game(Action::MoveRight));
        assert_eq!(key_to_command(key(KeyCode::Char('s'))), Command::Game(Action::MoveDown));
        assert_eq!(key_to_command(key(KeyCode::Char('w'))), Command::Game(Action::Rotate));
        assert_eq!(key_to_command(key(KeyCode::Char(' '))), Command::Game(Action::Restart));
    }

    #[test]
    fn arrows_alias_wasd() {
        assert_eq!(key_to_command(key(KeyCode::Left)), Command::Game(Action::MoveLeft));
        assert_eq!(key_to_command(key(KeyCode::Up)), Command::Game(Action::Rotate));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key_to_command(key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(key_to_command(key(KeyCode::Esc)), Command::Quit);
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
    }

    #[test]
    fn unbound_and_modified_keys_do_nothing() {
        assert_eq!(key_to_command(key(KeyCode::Char('x'))), Command::None);
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)),
            Command::None
        );
    }
}
