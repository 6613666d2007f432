use std::fmt;

/// Portable key code.
///
/// The discriminants are the integer codes handed across the C boundary and
/// must stay dense: letters occupy `1..=26`, digits follow at `27..=36`.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Key {
    Unknown = 0,

    // Letters
    A = 1, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0 = 27, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Space = 37,
    Enter,
    Escape,
    Backspace,
    Tab,

    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Super,

    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
}

impl Key {
    /// Number of codes in the key space, `Unknown` included.
    pub const COUNT: usize = 56;

    /// Every key, indexed by its code.
    pub const ALL: [Key; Key::COUNT] = [
        Key::Unknown,
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Backspace,
        Key::Tab,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::Shift,
        Key::Control,
        Key::Alt,
        Key::Super,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::Insert,
        Key::Delete,
    ];

    /// Integer code as seen by the host.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks a key up by its integer code.
    pub fn from_code(code: i32) -> Option<Key> {
        usize::try_from(code).ok().and_then(|i| Key::ALL.get(i).copied())
    }

    /// Classifies a printable character.
    ///
    /// Letters are case-insensitive. Returns `None` for anything that is not a
    /// letter, digit or space; those keys resolve through the physical table.
    pub fn from_char(ch: char) -> Option<Key> {
        let upper = ch.to_ascii_uppercase();
        match upper {
            'A'..='Z' => Key::from_code(Key::A.code() + (upper as i32 - 'A' as i32)),
            '0'..='9' => Key::from_code(Key::Digit0.code() + (upper as i32 - '0' as i32)),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Portable mouse button code.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    Extra1 = 3,
    Extra2 = 4,
}

impl MouseButton {
    pub const COUNT: usize = 5;

    pub const ALL: [MouseButton; MouseButton::COUNT] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Extra1,
        MouseButton::Extra2,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<MouseButton> {
        usize::try_from(code)
            .ok()
            .and_then(|i| MouseButton::ALL.get(i).copied())
    }

    /// Resolves the native index of a non-left/right button.
    ///
    /// Only 2 (middle), 3 and 4 (extra buttons) are represented.
    pub fn from_other_index(index: u16) -> Option<MouseButton> {
        match index {
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Extra1),
            4 => Some(MouseButton::Extra2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Key table ─────────────────────────────────────────────────────────

    #[test]
    fn all_is_indexed_by_code() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.code(), i as i32, "{key} out of place");
        }
        assert_eq!(Key::Delete.code() as usize, Key::COUNT - 1);
    }

    #[test]
    fn letters_are_case_insensitive_and_injective() {
        let mut seen = std::collections::HashSet::new();
        for (lower, upper) in ('a'..='z').zip('A'..='Z') {
            let k = Key::from_char(lower).unwrap();
            assert_eq!(Key::from_char(upper), Some(k));
            assert!((1..=26).contains(&k.code()));
            assert!(seen.insert(k));
        }
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn digits_follow_letter_range() {
        for (d, ch) in ('0'..='9').enumerate() {
            let k = Key::from_char(ch).unwrap();
            assert_eq!(k.code(), Key::Z.code() + d as i32 + 1);
        }
    }

    #[test]
    fn space_has_its_own_code() {
        assert_eq!(Key::from_char(' '), Some(Key::Space));
    }

    #[test]
    fn punctuation_is_not_classified() {
        assert_eq!(Key::from_char('!'), None);
        assert_eq!(Key::from_char('\r'), None);
        assert_eq!(Key::from_char('é'), None);
    }

    #[test]
    fn from_code_rejects_out_of_range() {
        assert_eq!(Key::from_code(-1), None);
        assert_eq!(Key::from_code(Key::COUNT as i32), None);
        assert_eq!(Key::from_code(0), Some(Key::Unknown));
    }

    // ── MouseButton ───────────────────────────────────────────────────────

    #[test]
    fn other_index_maps_middle_and_extras() {
        assert_eq!(MouseButton::from_other_index(2), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_other_index(3), Some(MouseButton::Extra1));
        assert_eq!(MouseButton::from_other_index(4), Some(MouseButton::Extra2));
        assert_eq!(MouseButton::from_other_index(5), None);
        assert_eq!(MouseButton::from_other_index(0), None);
    }

    #[test]
    fn button_codes_round_trip() {
        for b in MouseButton::ALL {
            assert_eq!(MouseButton::from_code(b.code()), Some(b));
        }
    }
}
