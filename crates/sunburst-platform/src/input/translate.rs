use winit::keyboard::{KeyCode, PhysicalKey};

use super::codes::{Key, MouseButton};
use super::sink::InputSink;
use super::types::{Modifiers, NativeEvent, NativeKeyEvent};

/// Translates one native event and pushes the resulting records to `sink`.
///
/// Key, button, pointer and text events always produce at least one record
/// (unknown keys go out as `Key::Unknown`). Out-of-range button indices and
/// zero scroll produce nothing.
pub fn translate_event<S>(event: &NativeEvent, sink: &mut S)
where
    S: InputSink + ?Sized,
{
    match event {
        NativeEvent::Key(NativeKeyEvent { characters, physical, pressed }) => {
            sink.set_key(map_key(characters.as_deref(), *physical), *pressed);
        }

        NativeEvent::FlagsChanged(m) => push_modifiers(*m, sink),

        NativeEvent::InsertText(text) => push_text(text, sink),

        NativeEvent::PointerMoved { x, y } => {
            sink.set_mouse_position(*x as i32, *y as i32);
        }

        NativeEvent::LeftButton { pressed } => sink.set_mouse_button(MouseButton::Left, *pressed),
        NativeEvent::RightButton { pressed } => sink.set_mouse_button(MouseButton::Right, *pressed),

        NativeEvent::OtherButton { index, pressed } => match MouseButton::from_other_index(*index) {
            Some(button) => sink.set_mouse_button(button, *pressed),
            None => log::trace!("ignoring mouse button index {index}"),
        },

        NativeEvent::Scroll { dy } => {
            if let Some(steps) = wheel_steps(*dy) {
                sink.add_wheel(steps);
            }
        }
    }
}

/// Resolves a key event to a portable code.
///
/// A single printable character wins (letters, digits, space); everything
/// else goes through the physical key table.
pub fn map_key(characters: Option<&str>, physical: PhysicalKey) -> Key {
    if let Some(key) = characters.and_then(classify_characters) {
        return key;
    }

    match physical {
        PhysicalKey::Code(code) => map_key_code(code),
        PhysicalKey::Unidentified(_) => Key::Unknown,
    }
}

/// Whole wheel steps for a raw scroll delta, rounded away from zero.
///
/// Returns `None` for zero (or non-finite) deltas.
pub fn wheel_steps(dy: f64) -> Option<i32> {
    if !dy.is_finite() || dy == 0.0 {
        return None;
    }
    let steps = if dy > 0.0 { dy.ceil() } else { dy.floor() };
    Some(steps as i32)
}

/// True for scalars forwarded as text: no C0 controls and no DEL.
pub fn is_text_scalar(ch: char) -> bool {
    let v = ch as u32;
    v >= 0x20 && v != 0x7F
}

fn classify_characters(chars: &str) -> Option<Key> {
    let mut it = chars.chars();
    match (it.next(), it.next()) {
        (Some(ch), None) => Key::from_char(ch),
        _ => None,
    }
}

fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,

        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,

        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Super,

        _ => Key::Unknown,
    }
}

fn push_modifiers<S>(m: Modifiers, sink: &mut S)
where
    S: InputSink + ?Sized,
{
    // All four every time; the platform reports combined state, not edges.
    sink.set_key(Key::Shift, m.shift);
    sink.set_key(Key::Control, m.ctrl);
    sink.set_key(Key::Alt, m.alt);
    sink.set_key(Key::Super, m.super_key);
}

fn push_text<S>(text: &str, sink: &mut S)
where
    S: InputSink + ?Sized,
{
    for ch in text.chars().filter(|&c| is_text_scalar(c)) {
        sink.push_codepoint(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputRecord;
    use winit::keyboard::NativeKeyCode;

    fn key(chars: Option<&str>, code: KeyCode, pressed: bool) -> NativeEvent {
        NativeEvent::Key(NativeKeyEvent {
            characters: chars.map(str::to_owned),
            physical: PhysicalKey::Code(code),
            pressed,
        })
    }

    fn run(events: &[NativeEvent]) -> Vec<InputRecord> {
        let mut out = Vec::new();
        for ev in events {
            translate_event(ev, &mut out);
        }
        out
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn character_lookup_wins_over_physical_key() {
        // AZERTY: physical Q produces 'a'.
        let out = run(&[key(Some("a"), KeyCode::KeyQ, true)]);
        assert_eq!(out, vec![InputRecord::Key { key: Key::A, pressed: true }]);
    }

    #[test]
    fn down_and_up_share_a_code() {
        let out = run(&[
            key(Some("7"), KeyCode::Digit7, true),
            key(Some("7"), KeyCode::Digit7, false),
        ]);
        assert_eq!(
            out,
            vec![
                InputRecord::Key { key: Key::Digit7, pressed: true },
                InputRecord::Key { key: Key::Digit7, pressed: false },
            ]
        );
    }

    #[test]
    fn non_printable_falls_back_to_physical_table() {
        assert_eq!(map_key(Some("\r"), PhysicalKey::Code(KeyCode::Enter)), Key::Enter);
        assert_eq!(map_key(Some("\u{1b}"), PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(None, PhysicalKey::Code(KeyCode::ArrowUp)), Key::ArrowUp);
        assert_eq!(map_key(None, PhysicalKey::Code(KeyCode::Delete)), Key::Delete);
        assert_eq!(map_key(None, PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
        assert_eq!(map_key(None, PhysicalKey::Code(KeyCode::SuperLeft)), Key::Super);
    }

    #[test]
    fn multi_character_strings_are_not_classified() {
        assert_eq!(map_key(Some("ab"), PhysicalKey::Code(KeyCode::F1)), Key::Unknown);
    }

    #[test]
    fn unknown_keys_are_forwarded_not_dropped() {
        let out = run(&[key(Some("!"), KeyCode::Digit1, true)]);
        assert_eq!(out, vec![InputRecord::Key { key: Key::Unknown, pressed: true }]);

        let unidentified = NativeEvent::Key(NativeKeyEvent {
            characters: None,
            physical: PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
            pressed: false,
        });
        assert_eq!(run(&[unidentified]), vec![InputRecord::Key { key: Key::Unknown, pressed: false }]);
    }

    // ── modifiers ─────────────────────────────────────────────────────────

    #[test]
    fn flags_changed_forwards_all_four_modifiers() {
        let m = Modifiers { shift: true, ctrl: false, alt: true, super_key: false };
        let out = run(&[NativeEvent::FlagsChanged(m)]);
        assert_eq!(
            out,
            vec![
                InputRecord::Key { key: Key::Shift, pressed: true },
                InputRecord::Key { key: Key::Control, pressed: false },
                InputRecord::Key { key: Key::Alt, pressed: true },
                InputRecord::Key { key: Key::Super, pressed: false },
            ]
        );
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn inserted_text_yields_one_record_per_scalar() {
        let out = run(&[NativeEvent::InsertText("Hi!".into())]);
        assert_eq!(
            out,
            vec![InputRecord::Text('H'), InputRecord::Text('i'), InputRecord::Text('!')]
        );
        let codes: Vec<u32> = out
            .iter()
            .filter_map(|r| match r {
                InputRecord::Text(c) => Some(*c as u32),
                _ => None,
            })
            .collect();
        assert_eq!(codes, vec![72, 105, 33]);
    }

    #[test]
    fn control_characters_and_delete_are_filtered() {
        let out = run(&[NativeEvent::InsertText("a\tb\u{7f}\u{1f}c".into())]);
        assert_eq!(
            out,
            vec![InputRecord::Text('a'), InputRecord::Text('b'), InputRecord::Text('c')]
        );
    }

    #[test]
    fn non_ascii_text_passes_through() {
        let out = run(&[NativeEvent::InsertText("é😀".into())]);
        assert_eq!(out, vec![InputRecord::Text('é'), InputRecord::Text('😀')]);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_coordinates_truncate() {
        let out = run(&[NativeEvent::PointerMoved { x: 10.9, y: 20.2 }]);
        assert_eq!(out, vec![InputRecord::MousePosition { x: 10, y: 20 }]);
    }

    #[test]
    fn mouse_buttons_map_by_kind_and_index() {
        let out = run(&[
            NativeEvent::LeftButton { pressed: true },
            NativeEvent::RightButton { pressed: false },
            NativeEvent::OtherButton { index: 2, pressed: true },
            NativeEvent::OtherButton { index: 3, pressed: true },
            NativeEvent::OtherButton { index: 4, pressed: false },
            NativeEvent::OtherButton { index: 7, pressed: true },
        ]);
        assert_eq!(
            out,
            vec![
                InputRecord::MouseButton { button: MouseButton::Left, pressed: true },
                InputRecord::MouseButton { button: MouseButton::Right, pressed: false },
                InputRecord::MouseButton { button: MouseButton::Middle, pressed: true },
                InputRecord::MouseButton { button: MouseButton::Extra1, pressed: true },
                InputRecord::MouseButton { button: MouseButton::Extra2, pressed: false },
            ]
        );
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_rounds_away_from_zero() {
        assert_eq!(wheel_steps(0.3), Some(1));
        assert_eq!(wheel_steps(-0.3), Some(-1));
        assert_eq!(wheel_steps(2.0), Some(2));
        assert_eq!(wheel_steps(-2.5), Some(-3));
    }

    #[test]
    fn zero_wheel_produces_no_record() {
        assert_eq!(wheel_steps(0.0), None);
        assert_eq!(wheel_steps(f64::NAN), None);
        assert!(run(&[NativeEvent::Scroll { dy: 0.0 }]).is_empty());
        assert_eq!(run(&[NativeEvent::Scroll { dy: 0.3 }]), vec![InputRecord::Wheel(1)]);
    }
}
