use anyhow::Result;

use crate::device::{GpuInit, GraphicsContext};
use crate::input::NativeEvent;

use super::native::{NativeWindow, WindowSpec};

/// Event drained from the native queue for the current window.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    CloseRequested,
    /// The content area changed size.
    Resized,
    /// The backing scale factor changed (e.g. moved to another display).
    ScaleFactorChanged,
    /// Input delivered to the drawable view.
    Input(NativeEvent),
}

/// Native windowing toolkit plus graphics API.
///
/// Implementations own the native event queue. At most one window is handed
/// out at a time; `release_window` returns it.
pub trait Backend {
    type Window: NativeWindow;
    type Context: GraphicsContext;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window>;

    /// Creates a graphics context bound to `window`'s content area.
    fn create_context(&mut self, window: &Self::Window, init: &GpuInit) -> Result<Self::Context>;

    /// Drains every pending native event without blocking and appends the
    /// current window's events to `out` in arrival order.
    fn pump_events(&mut self, out: &mut Vec<PlatformEvent>);

    /// Releases the native window. Events still queued for it are dropped.
    fn release_window(&mut self, window: Self::Window);
}
