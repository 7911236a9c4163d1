use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    /// Front-end only: switch between the full field and the head-follow view
    ToggleCamera,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Self::movement(Direction::Up),
            KeyCode::Down => Self::movement(Direction::Down),
            KeyCode::Left => Self::movement(Direction::Left),
            KeyCode::Right => Self::movement(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::movement(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::movement(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::movement(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::movement(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                KeyAction::Game(Command::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Restart),
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ToggleCamera,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn movement(direction: Direction) -> KeyAction {
        KeyAction::Game(Command::Move(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Up),
            KeyAction::Game(Command::Move(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Down),
            KeyAction::Game(Command::Move(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Left),
            KeyAction::Game(Command::Move(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Right),
            KeyAction::Game(Command::Move(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('w')),
            KeyAction::Game(Command::Move(Direction::Up))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('a')),
            KeyAction::Game(Command::Move(Direction::Left))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('s')),
            KeyAction::Game(Command::Move(Direction::Down))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('D')),
            KeyAction::Game(Command::Move(Direction::Right))
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('p')),
            KeyAction::Game(Command::TogglePause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char(' ')),
            KeyAction::Game(Command::TogglePause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('R')),
            KeyAction::Game(Command::Restart)
        );
        assert_eq!(press(&handler, KeyCode::Char('c')), KeyAction::ToggleCamera);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }
}
