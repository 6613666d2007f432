use super::codes::{Key, MouseButton};
use super::types::InputRecord;

/// Destination for translated input.
///
/// These five calls are the whole contract with the input-state store. The
/// platform layer never reads back from the sink.
pub trait InputSink {
    fn set_key(&mut self, key: Key, down: bool);
    fn set_mouse_button(&mut self, button: MouseButton, down: bool);
    fn set_mouse_position(&mut self, x: i32, y: i32);
    fn add_wheel(&mut self, steps: i32);
    fn push_codepoint(&mut self, cp: char);

    /// Routes a record to the matching call.
    fn deliver(&mut self, record: InputRecord) {
        match record {
            InputRecord::Key { key, pressed } => self.set_key(key, pressed),
            InputRecord::MouseButton { button, pressed } => self.set_mouse_button(button, pressed),
            InputRecord::MousePosition { x, y } => self.set_mouse_position(x, y),
            InputRecord::Wheel(steps) => self.add_wheel(steps),
            InputRecord::Text(cp) => self.push_codepoint(cp),
        }
    }
}

/// Records in arrival order. Handy for hosts that want a raw event stream.
impl InputSink for Vec<InputRecord> {
    fn set_key(&mut self, key: Key, down: bool) {
        Vec::push(self, InputRecord::Key { key, pressed: down });
    }

    fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        Vec::push(self, InputRecord::MouseButton { button, pressed: down });
    }

    fn set_mouse_position(&mut self, x: i32, y: i32) {
        Vec::push(self, InputRecord::MousePosition { x, y });
    }

    fn add_wheel(&mut self, steps: i32) {
        Vec::push(self, InputRecord::Wheel(steps));
    }

    fn push_codepoint(&mut self, cp: char) {
        Vec::push(self, InputRecord::Text(cp));
    }
}
