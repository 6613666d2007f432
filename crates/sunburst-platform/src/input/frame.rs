use std::collections::{HashSet, VecDeque};

use super::codes::{Key, MouseButton};

/// Everything that happened since the last `begin_frame`.
///
/// Held state lives on `InputState`; this only records edges and
/// accumulators, and is emptied at each frame start.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Up-to-down transitions.
    pub keys_pressed: HashSet<Key>,

    /// Down-to-up transitions.
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,

    /// Wheel steps accumulated this frame.
    pub wheel: i32,

    /// Text committed this frame, oldest first.
    pub text: VecDeque<char>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel = 0;
        self.text.clear();
    }
}
