/// Requirements and preferences for context negotiation.
///
/// Defaults ask for a hardware adapter, double buffering and a 24-bit depth
/// buffer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Graphics APIs the instance may use.
    pub backends: wgpu::Backends,

    /// Adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Compositing alpha mode. Falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames that may be queued ahead of presentation. Must be at least 2
    /// (double buffering).
    pub desired_maximum_frame_latency: u32,

    /// Depth attachment format; must carry at least 24 bits of depth.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth_format: wgpu::TextureFormat::Depth24Plus,
        }
    }
}
