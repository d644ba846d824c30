//! Pointer gesture handler for terminal environments.
//!
//! Terminals report mouse drags as a burst of motion events, far more than
//! one per frame. The handler coalesces consecutive moves into the latest
//! one and keeps the down/move/up order intact.
//!
//! Some terminals never report the button release. A press that has seen no
//! mouse activity for the release timeout is closed with a synthesized
//! `Up` at the last known position, so a drag cannot get stuck.

use arrayvec::ArrayVec;
use crossterm::event::{Event, KeyEvent};

use crate::map::{handle_key_event, map_mouse_event};
use crate::types::{Point, PointerEvent, PuzzleCommand};

/// Maximum actions buffered between drains.
pub const INPUT_QUEUE_CAPACITY: usize = 32;

const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Pointer(PointerEvent),
    Command(PuzzleCommand),
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    queue: ArrayVec<InputAction, INPUT_QUEUE_CAPACITY>,
    pending_move: Option<Point>,
    pressed_at: Option<Point>,
    idle_ms: u32,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            queue: ArrayVec::new(),
            pending_move: None,
            pressed_at: None,
            idle_ms: 0,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                if let Some(pointer) = map_mouse_event(*mouse) {
                    self.handle_pointer(pointer);
                }
            }
            Event::Resize(width, height) => {
                self.push(InputAction::Resize {
                    width: *width,
                    height: *height,
                });
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = handle_key_event(key) {
            self.push(InputAction::Command(command));
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.idle_ms = 0;
        match event {
            PointerEvent::Move(p) => {
                if self.pressed_at.is_some() {
                    self.pending_move = Some(p);
                    self.pressed_at = Some(p);
                }
            }
            PointerEvent::Down(p) => {
                if let Some(prev) = self.pressed_at {
                    // Missed release: close the previous press first.
                    self.release_at(prev);
                }
                self.pressed_at = Some(p);
                self.push(InputAction::Pointer(event));
            }
            PointerEvent::Up(p) => {
                if self.pressed_at.is_some() {
                    self.release_at(p);
                }
            }
        }
    }

    /// Advance the release timeout.
    pub fn update(&mut self, elapsed_ms: u32) {
        let Some(p) = self.pressed_at else {
            return;
        };
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms >= self.release_timeout_ms {
            self.release_at(p);
        }
    }

    /// Take everything queued since the last drain, in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputAction> + '_ {
        self.flush_move();
        self.queue.drain(..)
    }

    fn release_at(&mut self, p: Point) {
        self.pressed_at = None;
        self.idle_ms = 0;
        self.pending_move = Some(p);
        self.flush_move();
        self.push(InputAction::Pointer(PointerEvent::Up(p)));
    }

    fn flush_move(&mut self) {
        if let Some(p) = self.pending_move.take() {
            self.push(InputAction::Pointer(PointerEvent::Move(p)));
        }
    }

    fn push(&mut self, action: InputAction) {
        if !is_move(&action) {
            self.flush_move();
        }
        if self.queue.is_full() && !self.make_room(&action) {
            return;
        }
        self.queue.push(action);
    }

    /// Free one slot without splitting a press from its release.
    ///
    /// Eviction order: the oldest move, then the oldest command other than
    /// quit (or a resize), then the oldest complete click. A move that finds
    /// no room is dropped instead.
    fn make_room(&mut self, incoming: &InputAction) -> bool {
        if let Some(i) = self.queue.iter().position(is_move) {
            self.queue.remove(i);
            return true;
        }
        if is_move(incoming) {
            return false;
        }
        let expendable = self.queue.iter().position(|a| {
            matches!(a, InputAction::Command(c) if *c != PuzzleCommand::Quit)
                || matches!(a, InputAction::Resize { .. })
        });
        if let Some(i) = expendable {
            self.queue.remove(i);
            return true;
        }
        let down = self
            .queue
            .iter()
            .position(|a| matches!(a, InputAction::Pointer(PointerEvent::Down(_))));
        if let Some(d) = down {
            let up = self.queue[d + 1..]
                .iter()
                .position(|a| matches!(a, InputAction::Pointer(PointerEvent::Up(_))));
            if let Some(u) = up {
                self.queue.remove(d + 1 + u);
                self.queue.remove(d);
                return true;
            }
        }
        false
    }
}

fn is_move(action: &InputAction) -> bool {
    matches!(action, InputAction::Pointer(PointerEvent::Move(_)))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn drained(h: &mut InputHandler) -> Vec<InputAction> {
        h.drain().collect()
    }

    #[test]
    fn moves_are_coalesced_between_down_and_up() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Down(p(1.0, 1.0)));
        h.handle_pointer(PointerEvent::Move(p(2.0, 1.0)));
        h.handle_pointer(PointerEvent::Move(p(3.0, 1.0)));
        h.handle_pointer(PointerEvent::Move(p(4.0, 2.0)));
        h.handle_pointer(PointerEvent::Up(p(4.0, 2.0)));

        assert_eq!(
            drained(&mut h),
            vec![
                InputAction::Pointer(PointerEvent::Down(p(1.0, 1.0))),
                InputAction::Pointer(PointerEvent::Move(p(4.0, 2.0))),
                InputAction::Pointer(PointerEvent::Up(p(4.0, 2.0))),
            ]
        );
        assert!(!h.is_pressed());
    }

    #[test]
    fn pending_move_is_flushed_on_drain() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Down(p(1.0, 1.0)));
        h.handle_pointer(PointerEvent::Move(p(5.0, 5.0)));
        assert_eq!(
            drained(&mut h),
            vec![
                InputAction::Pointer(PointerEvent::Down(p(1.0, 1.0))),
                InputAction::Pointer(PointerEvent::Move(p(5.0, 5.0))),
            ]
        );
        assert!(h.is_pressed());
        assert!(drained(&mut h).is_empty());
    }

    #[test]
    fn hover_and_stray_release_are_ignored() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Move(p(5.0, 5.0)));
        h.handle_pointer(PointerEvent::Up(p(5.0, 5.0)));
        assert!(drained(&mut h).is_empty());
    }

    #[test]
    fn missing_release_times_out() {
        let mut h = InputHandler::new().with_release_timeout_ms(100);
        h.handle_pointer(PointerEvent::Down(p(1.0, 1.0)));
        h.update(60);
        assert!(h.is_pressed());
        h.update(60);
        assert!(!h.is_pressed());

        let actions = drained(&mut h);
        assert_eq!(
            actions.last(),
            Some(&InputAction::Pointer(PointerEvent::Up(p(1.0, 1.0))))
        );
    }

    #[test]
    fn second_press_closes_the_first() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Down(p(1.0, 1.0)));
        h.handle_pointer(PointerEvent::Down(p(9.0, 9.0)));
        let actions = drained(&mut h);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[2], InputAction::Pointer(PointerEvent::Up(p(1.0, 1.0))));
        assert_eq!(actions[3], InputAction::Pointer(PointerEvent::Down(p(9.0, 9.0))));
    }

    #[test]
    fn crossterm_events_are_translated() {
        let mut h = InputHandler::new();
        h.handle_event(&Event::Key(KeyEvent::from(KeyCode::Char('r'))));
        h.handle_event(&Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }));
        h.handle_event(&Event::Resize(80, 24));

        assert_eq!(
            drained(&mut h),
            vec![
                InputAction::Command(PuzzleCommand::Reset),
                InputAction::Pointer(PointerEvent::Down(p(2.5, 3.5))),
                InputAction::Resize {
                    width: 80,
                    height: 24
                },
            ]
        );
    }

    #[test]
    fn full_queue_drops_oldest_move() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Down(p(0.0, 0.0)));
        h.handle_pointer(PointerEvent::Move(p(1.0, 0.0)));
        for _ in 0..INPUT_QUEUE_CAPACITY - 1 {
            h.handle_key(KeyEvent::from(KeyCode::Char('h')));
        }
        let actions = drained(&mut h);
        assert_eq!(actions.len(), INPUT_QUEUE_CAPACITY);
        assert_eq!(actions[0], InputAction::Pointer(PointerEvent::Down(p(0.0, 0.0))));
        assert!(actions[1..]
            .iter()
            .all(|a| *a == InputAction::Command(PuzzleCommand::Hint)));
    }

    #[test]
    fn full_queue_never_splits_a_click() {
        let mut h = InputHandler::new();
        for i in 0..INPUT_QUEUE_CAPACITY / 2 {
            h.handle_pointer(PointerEvent::Down(p(i as f32, 0.0)));
            h.handle_pointer(PointerEvent::Up(p(i as f32, 0.0)));
        }
        h.handle_pointer(PointerEvent::Down(p(100.0, 0.0)));
        h.handle_pointer(PointerEvent::Up(p(100.0, 0.0)));

        let actions = drained(&mut h);
        assert_eq!(actions.len(), INPUT_QUEUE_CAPACITY);
        for pair in actions.chunks(2) {
            assert!(matches!(pair[0], InputAction::Pointer(PointerEvent::Down(_))));
            assert!(matches!(pair[1], InputAction::Pointer(PointerEvent::Up(_))));
        }
        assert_eq!(actions[0], InputAction::Pointer(PointerEvent::Down(p(1.0, 0.0))));
        assert_eq!(actions.last(), Some(&InputAction::Pointer(PointerEvent::Up(p(100.0, 0.0)))));
    }

    #[test]
    fn full_queue_drops_commands_before_pointer_events() {
        let mut h = InputHandler::new();
        h.handle_pointer(PointerEvent::Down(p(0.0, 0.0)));
        for _ in 0..INPUT_QUEUE_CAPACITY - 2 {
            h.handle_key(KeyEvent::from(KeyCode::Char('h')));
        }
        h.handle_pointer(PointerEvent::Up(p(0.0, 0.0)));
        h.handle_key(KeyEvent::from(KeyCode::Char('q')));
        h.handle_key(KeyEvent::from(KeyCode::Char('r')));

        let actions = drained(&mut h);
        assert_eq!(actions.len(), INPUT_QUEUE_CAPACITY);
        assert_eq!(actions[0], InputAction::Pointer(PointerEvent::Down(p(0.0, 0.0))));
        assert!(actions.contains(&InputAction::Pointer(PointerEvent::Up(p(0.0, 0.0)))));
        assert!(actions.contains(&InputAction::Command(PuzzleCommand::Quit)));
        assert_eq!(actions.last(), Some(&InputAction::Command(PuzzleCommand::Reset)));
    }
}
