//! Mapping from terminal events to pointer events and puzzle commands.
//!
//! Pointer coordinates are in terminal cells. A mouse event at column `c`,
//! row `r` maps to the cell center `(c + 0.5, r + 0.5)`, so snapping math in
//! the core never sits exactly on a cell boundary.

use crate::types::{Point, PointerEvent, PuzzleCommand};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Map keyboard input to puzzle commands.
pub fn handle_key_event(key: KeyEvent) -> Option<PuzzleCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(PuzzleCommand::Quit);
    }
    match key.code {
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => Some(PuzzleCommand::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PuzzleCommand::Reset),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(PuzzleCommand::NewGame),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(column as f32 + 0.5, row as f32 + 0.5)
}

/// Map a left-button mouse event. Other buttons and plain motion are ignored.
pub fn map_mouse_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let p = cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down(p)),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move(p)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up(p)),
        _ => None,
    }
}
