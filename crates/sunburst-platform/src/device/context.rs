use winit::dpi::PhysicalSize;

/// Graphics context bound to the window's drawable surface.
///
/// The window manager only drives these operations; rendering itself goes
/// through the concrete context type.
pub trait GraphicsContext {
    /// Resizes the drawable to `size` physical pixels.
    fn resize(&mut self, size: PhysicalSize<u32>);

    /// Number of vertical syncs to wait before presenting (0 = unlocked).
    fn set_swap_interval(&mut self, interval: u32);

    fn swap_interval(&self) -> u32;

    /// Presents the back buffer.
    fn swap_buffers(&mut self);
}
