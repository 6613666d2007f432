use winit::dpi::LogicalSize;

/// Creation parameters for the native window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    /// Content size in logical units.
    pub size: LogicalSize<f64>,
    pub resizable: bool,
    pub closable: bool,
    pub minimizable: bool,
}

/// The native window object as the window manager sees it.
pub trait NativeWindow {
    fn set_title(&self, title: &str);

    /// Requests a new content size in logical units.
    fn set_content_size(&self, size: LogicalSize<f64>);

    /// Shows the window and brings it to the front with keyboard focus.
    fn present(&self);

    fn hide(&self);

    /// Current content size in logical units.
    fn content_size(&self) -> LogicalSize<f64>;

    /// Backing scale factor (physical pixels per logical unit).
    fn scale_factor(&self) -> f64;
}

/// Physical framebuffer size for a logical content size.
///
/// `logical * scale`, truncated toward zero. Products within 1e-6 of a whole
/// number are snapped to it first, so a size that went physical → logical →
/// physical comes back unchanged.
pub fn framebuffer_size(logical: LogicalSize<f64>, scale: f64) -> (i32, i32) {
    (to_pixels(logical.width, scale), to_pixels(logical.height, scale))
}

fn to_pixels(logical: f64, scale: f64) -> i32 {
    let v = logical * scale;
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        nearest as i32
    } else {
        v as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_is_identity() {
        assert_eq!(framebuffer_size(LogicalSize::new(800.0, 600.0), 1.0), (800, 600));
    }

    #[test]
    fn fractional_scale_truncates() {
        assert_eq!(framebuffer_size(LogicalSize::new(800.0, 600.0), 1.5), (1200, 900));
        assert_eq!(framebuffer_size(LogicalSize::new(333.0, 101.0), 1.5), (499, 151));
    }

    #[test]
    fn retina_doubles() {
        assert_eq!(framebuffer_size(LogicalSize::new(640.5, 480.25), 2.0), (1281, 960));
    }

    #[test]
    fn round_trip_through_logical_units_is_stable() {
        for phys in [1201u32, 1367, 999, 1] {
            for scale in [1.25, 1.5, 1.75, 3.0] {
                let logical = f64::from(phys) / scale;
                let (w, _) = framebuffer_size(LogicalSize::new(logical, logical), scale);
                assert_eq!(w, phys as i32, "phys {phys} at {scale}");
            }
        }
    }
}
