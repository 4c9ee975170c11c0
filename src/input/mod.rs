use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::command::Command;

/// Synthetic delta for one wheel tick; navigation only looks at the sign.
pub const WHEEL_STEP: f32 = 1.0;

pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('j') | KeyCode::PageDown => Some(Command::NextPage),
        KeyCode::Char('k') | KeyCode::PageUp => Some(Command::PrevPage),
        KeyCode::Down => Some(Command::ScrollBy { rows: 1 }),
        KeyCode::Up => Some(Command::ScrollBy { rows: -1 }),
        KeyCode::Char('d') => Some(Command::SaveCopy),
        KeyCode::Char('s') => Some(Command::ToggleStatus),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

pub fn map_wheel(mouse: MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Command::Wheel { delta: WHEEL_STEP }),
        MouseEventKind::ScrollUp => Some(Command::Wheel { delta: -WHEEL_STEP }),
        _ => None,
    }
}
