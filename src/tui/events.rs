use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Cancel,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    Confirm,
    Backspace,
    Restart,
    Retry,
    ToggleFocus,
    CycleSort,
    Input(char),
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
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Left, _) | (KeyCode::PageUp, _) => Action::PrevPage,
        (KeyCode::Right, _) | (KeyCode::PageDown, _) => Action::NextPage,

        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::ToggleFocus,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Restart,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) | (KeyCode::F(5), _) => Action::Retry,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::CycleSort,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::Backspace,

        _ => Action::None,
    }
}
