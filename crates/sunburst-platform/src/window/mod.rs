//! Window lifecycle and event pumping.
//!
//! `Platform` owns the single window and its graphics context; a `Backend`
//! supplies the native objects. `WinitBackend` is the desktop backend.

mod backend;
mod config;
mod manager;
mod native;
mod runtime;

pub use backend::{Backend, PlatformEvent};
pub use config::PlatformConfig;
pub use manager::Platform;
pub use native::{framebuffer_size, NativeWindow, WindowSpec};
pub use runtime::{WinitBackend, WinitWindow};
