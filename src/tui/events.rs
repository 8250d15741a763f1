use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Submit,
    ClearQuery,
    NextDatabase,
    PrevDatabase,
    NextCategory,
    PrevCategory,
    MoveUp,
    MoveDown,
    CopySelected,
    InputChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearQuery,

        // Search
        (KeyCode::Enter, _) => Action::Submit,

        // Form controls
        (KeyCode::Tab, _) => Action::NextDatabase,
        (KeyCode::BackTab, _) => Action::PrevDatabase,
        (KeyCode::Right, _) => Action::NextCategory,
        (KeyCode::Left, _) => Action::PrevCategory,

        // Result selection
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,

        // Actions
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopySelected,

        // Query input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
