//! Input subsystem.
//!
//! Native toolkit events are reduced to `NativeEvent`s, translated into the
//! portable key/button code space and pushed into an `InputSink`. `InputState`
//! is the built-in sink.

mod codes;
mod frame;
pub mod platform;
mod sink;
mod state;
mod translate;
mod types;

pub use codes::{Key, MouseButton};
pub use frame::InputFrame;
pub use sink::InputSink;
pub use state::InputState;
pub use translate::{is_text_scalar, map_key, translate_event, wheel_steps};
pub use types::{InputRecord, Modifiers, NativeEvent, NativeKeyEvent};
