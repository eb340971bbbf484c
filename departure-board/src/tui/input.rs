//! Terminal events to board actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// What the UI loop should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    /// The terminal changed size; repaint without waiting for the tick.
    Redraw,
}

impl Action {
    /// Map a terminal event to an action. Unbound events map to `None`.
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => Some(Action::ScrollUp),
                MouseEventKind::ScrollDown => Some(Action::ScrollDown),
                _ => None,
            },
            Event::Resize(_, _) => Some(Action::Redraw),
            _ => None,
        }
    }

    fn from_key(key: &KeyEvent) -> Option<Self> {
        // Release and repeat events arrive on some platforms
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            _ => None,
        }
    }
}
