use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as LogicalKey, ModifiersState};
use winit::platform::modifier_supplement::KeyEventExtModifierSupplement;

use crate::input::{Modifiers, NativeEvent, NativeKeyEvent};

/// Translates a winit `WindowEvent` into the view-level events it represents.
///
/// `scale` is the window's current scale factor; pointer and pixel-scroll
/// positions are converted to logical units with it. Events that carry no
/// input append nothing.
pub fn native_events(scale: f64, event: &WindowEvent, out: &mut Vec<NativeEvent>) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            out.push(NativeEvent::FlagsChanged(map_modifiers(m.state())));
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(scale, *position);
            out.push(NativeEvent::PointerMoved { x, y });
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let pressed = *state == ElementState::Pressed;
            out.push(map_mouse_button(*button, pressed));
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                MouseScrollDelta::PixelDelta(p) => to_logical(scale, *p).1,
            };
            out.push(NativeEvent::Scroll { dy });
        }

        WindowEvent::KeyboardInput { event, .. } => {
            out.push(NativeEvent::Key(NativeKeyEvent {
                characters: characters_ignoring_modifiers(event),
                physical: event.physical_key,
                pressed: event.state == ElementState::Pressed,
            }));

            // Typed text travels on the press alongside the raw key.
            if event.state == ElementState::Pressed {
                if let Some(text) = event.text.as_ref().filter(|t| !t.is_empty()) {
                    out.push(NativeEvent::InsertText(text.to_string()));
                }
            }
        }

        WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => {
            out.push(NativeEvent::InsertText(text.clone()));
        }

        _ => {}
    }
}

fn characters_ignoring_modifiers(event: &KeyEvent) -> Option<String> {
    match event.key_without_modifiers() {
        LogicalKey::Character(s) => Some(s.to_string()),
        LogicalKey::Named(named) => named.to_text().map(str::to_owned),
        _ => None,
    }
}

fn to_logical(scale: f64, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(scale);
    (logical.x, logical.y)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        super_key: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton, pressed: bool) -> NativeEvent {
    match b {
        WinitMouseButton::Left => NativeEvent::LeftButton { pressed },
        WinitMouseButton::Right => NativeEvent::RightButton { pressed },
        WinitMouseButton::Middle => NativeEvent::OtherButton { index: 2, pressed },
        WinitMouseButton::Back => NativeEvent::OtherButton { index: 3, pressed },
        WinitMouseButton::Forward => NativeEvent::OtherButton { index: 4, pressed },
        WinitMouseButton::Other(index) => NativeEvent::OtherButton { index, pressed },
    }
}
