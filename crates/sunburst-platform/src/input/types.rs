use winit::keyboard::PhysicalKey;

use super::codes::{Key, MouseButton};

/// Modifier keys state.
///
/// This is stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub super_key: bool,
}

/// Key event as delivered by the native toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeKeyEvent {
    /// Characters the key produces with modifiers ignored, if any.
    pub characters: Option<String>,

    /// Physical key identifier.
    pub physical: PhysicalKey,

    pub pressed: bool,
}

/// Input as delivered to the drawable view, before translation.
///
/// Runtime code builds these from window system events; the translator turns
/// each one into zero or more portable records.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    Key(NativeKeyEvent),

    /// Combined modifier state changed.
    FlagsChanged(Modifiers),

    /// Committed text inserted into the view.
    InsertText(String),

    /// Pointer position in view-local logical coordinates.
    PointerMoved { x: f64, y: f64 },

    LeftButton { pressed: bool },
    RightButton { pressed: bool },

    /// Any button other than left/right, identified by native index.
    OtherButton { index: u16, pressed: bool },

    /// Vertical scroll in raw platform units.
    Scroll { dy: f64 },
}

/// Normalized record pushed to an input sink.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputRecord {
    Key { key: Key, pressed: bool },
    MouseButton { button: MouseButton, pressed: bool },
    MousePosition { x: i32, y: i32 },
    Wheel(i32),
    Text(char),
}
