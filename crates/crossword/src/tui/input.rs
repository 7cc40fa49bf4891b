//! Key mapping for the puzzle screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::{Action, ArrowKey};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A game action.
    Act(Action),
    /// Pause if running, resume if paused.
    TogglePause,
    /// Write the completion card.
    Share,
    /// Dismiss the open dialog.
    Confirm,
    /// Leave the game.
    Quit,
}

/// Maps a key press to an input. Unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Input::Quit),
            KeyCode::Char('p') => Some(Input::TogglePause),
            KeyCode::Char('s') => Some(Input::Share),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char(' ') => return Some(Input::Confirm),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Action::Letter(c),
        KeyCode::Backspace | KeyCode::Delete => Action::Backspace,
        KeyCode::Enter | KeyCode::Tab => Action::NextClue,
        KeyCode::BackTab => Action::PreviousClue,
        KeyCode::Up => Action::Arrow(ArrowKey::Up),
        KeyCode::Down => Action::Arrow(ArrowKey::Down),
        KeyCode::Left => Action::Arrow(ArrowKey::Left),
        KeyCode::Right => Action::Arrow(ArrowKey::Right),
        KeyCode::Esc => return Some(Input::TogglePause),
        _ => return None,
    };
    Some(Input::Act(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_letters_and_digits_enter_guesses() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(Input::Act(Action::Letter('a'))));
        assert_eq!(map_key(key(KeyCode::Char('7'))), Some(Input::Act(Action::Letter('7'))));
        assert_eq!(map_key(key(KeyCode::Char('#'))), None);
    }

    #[test]
    fn test_clue_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Input::Act(Action::NextClue)));
        assert_eq!(map_key(key(KeyCode::Tab)), Some(Input::Act(Action::NextClue)));
        assert_eq!(map_key(key(KeyCode::BackTab)), Some(Input::Act(Action::PreviousClue)));
        assert_eq!(
            map_key(key(KeyCode::Left)),
            Some(Input::Act(Action::Arrow(ArrowKey::Left)))
        );
        assert_eq!(map_key(key(KeyCode::Backspace)), Some(Input::Act(Action::Backspace)));
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(map_key(ctrl('q')), Some(Input::Quit));
        assert_eq!(map_key(ctrl('c')), Some(Input::Quit));
        assert_eq!(map_key(ctrl('p')), Some(Input::TogglePause));
        assert_eq!(map_key(ctrl('s')), Some(Input::Share));
        assert_eq!(map_key(ctrl('a')), None);
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Input::TogglePause));
    }
}
