//! Sunburst platform layer.
//!
//! One window, one hardware graphics context bound to it, and keyboard/mouse
//! input normalized to a portable code space. Hosts drive it once per frame,
//! either through [`window::Platform`] from Rust or through the C exports in
//! [`ffi`].

pub mod device;
pub mod ffi;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
