use std::collections::HashSet;

use super::codes::{Key, MouseButton};
use super::frame::InputFrame;
use super::sink::InputSink;

/// Portable input-state store.
///
/// Holds "is down" information and the pointer position. Per-frame transitions,
/// wheel steps and text are recorded into `frame` and dropped by `begin_frame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in view-local logical pixels.
    pub pointer_pos: (i32, i32),

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Deltas since the last `begin_frame`.
    pub frame: InputFrame,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame. Call before polling events.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.frame.keys_pressed.contains(&key)
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.frame.keys_released.contains(&key)
    }

    pub fn mouse_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn mouse_pressed(&self, btn: MouseButton) -> bool {
        self.frame.buttons_pressed.contains(&btn)
    }

    pub fn mouse_released(&self, btn: MouseButton) -> bool {
        self.frame.buttons_released.contains(&btn)
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        self.pointer_pos
    }

    pub fn wheel_delta(&self) -> i32 {
        self.frame.wheel
    }

    /// Pops the oldest character typed this frame.
    pub fn next_char(&mut self) -> Option<char> {
        self.frame.text.pop_front()
    }
}

impl InputSink for InputState {
    fn set_key(&mut self, key: Key, down: bool) {
        if key == Key::Unknown {
            return;
        }

        if down {
            if self.keys_down.insert(key) {
                self.frame.keys_pressed.insert(key);
            }
        } else if self.keys_down.remove(&key) {
            self.frame.keys_released.insert(key);
        }
    }

    fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if down {
            if self.buttons_down.insert(button) {
                self.frame.buttons_pressed.insert(button);
            }
        } else if self.buttons_down.remove(&button) {
            self.frame.buttons_released.insert(button);
        }
    }

    fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.pointer_pos = (x, y);
    }

    fn add_wheel(&mut self, steps: i32) {
        self.frame.wheel = self.frame.wheel.saturating_add(steps);
    }

    fn push_codepoint(&mut self, cp: char) {
        self.frame.text.push_back(cp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn press_sets_down_and_pressed() {
        let mut s = InputState::new();
        s.set_key(Key::W, true);
        assert!(s.key_down(Key::W));
        assert!(s.key_pressed(Key::W));
        assert!(!s.key_released(Key::W));
    }

    #[test]
    fn held_key_is_not_pressed_again_next_frame() {
        let mut s = InputState::new();
        s.set_key(Key::W, true);
        s.begin_frame();
        s.set_key(Key::W, true); // key repeat
        assert!(s.key_down(Key::W));
        assert!(!s.key_pressed(Key::W));
    }

    #[test]
    fn release_records_transition() {
        let mut s = InputState::new();
        s.set_key(Key::Space, true);
        s.begin_frame();
        s.set_key(Key::Space, false);
        assert!(!s.key_down(Key::Space));
        assert!(s.key_released(Key::Space));
    }

    #[test]
    fn unknown_key_is_never_stored() {
        let mut s = InputState::new();
        s.set_key(Key::Unknown, true);
        assert!(!s.key_down(Key::Unknown));
        assert!(s.frame.keys_pressed.is_empty());
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut s = InputState::new();
        s.set_key(Key::Shift, false);
        assert!(!s.key_released(Key::Shift));
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn mouse_button_transitions() {
        let mut s = InputState::new();
        s.set_mouse_button(MouseButton::Middle, true);
        assert!(s.mouse_down(MouseButton::Middle));
        assert!(s.mouse_pressed(MouseButton::Middle));
        s.begin_frame();
        s.set_mouse_button(MouseButton::Middle, false);
        assert!(s.mouse_released(MouseButton::Middle));
        assert!(!s.mouse_down(MouseButton::Middle));
    }

    #[test]
    fn position_survives_begin_frame() {
        let mut s = InputState::new();
        s.set_mouse_position(12, 34);
        s.begin_frame();
        assert_eq!(s.mouse_position(), (12, 34));
    }

    #[test]
    fn wheel_accumulates_within_a_frame() {
        let mut s = InputState::new();
        s.add_wheel(1);
        s.add_wheel(2);
        s.add_wheel(-1);
        assert_eq!(s.wheel_delta(), 2);
        s.begin_frame();
        assert_eq!(s.wheel_delta(), 0);
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn text_queue_is_fifo_and_per_frame() {
        let mut s = InputState::new();
        s.push_codepoint('H');
        s.push_codepoint('i');
        assert_eq!(s.next_char(), Some('H'));
        s.begin_frame();
        assert_eq!(s.next_char(), None);
    }
}
