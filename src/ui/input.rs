//! Input handling for the TUI.
//!
//! This module handles terminal events and translates them into application actions.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Actions that can be performed based on terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Toggle help panel
    ToggleHelp,
    /// Terminal was resized to (columns, rows)
    Resize(u16, u16),
    /// No action
    None,
}

/// Wait up to `timeout` for a terminal event and map it to an action
pub fn handle_input(timeout: Duration) -> std::io::Result<InputAction> {
    if event::poll(timeout)? {
        return Ok(map_event(event::read()?));
    }
    Ok(InputAction::None)
}

fn map_event(event: Event) -> InputAction {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => map_key_to_action(key_event),
        Event::Resize(columns, rows) => InputAction::Resize(columns, rows),
        _ => InputAction::None,
    }
}

/// Map a key event to an application action
fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }

        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
            InputAction::ToggleHelp
        }

        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_actions() {
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty())),
            InputAction::Quit
        );
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Esc, KeyModifiers::empty())),
            InputAction::Quit
        );
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty())),
            InputAction::None
        );
    }

    #[test]
    fn test_resize_and_help() {
        assert_eq!(map_event(Event::Resize(120, 40)), InputAction::Resize(120, 40));
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(KeyCode::F(1), KeyModifiers::empty()))),
            InputAction::ToggleHelp
        );
    }
}
