use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface;
use super::{GpuFrame, GpuInit, GraphicsContext, SurfaceErrorAction};

/// Negotiated surface description. Fixed once the context exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFormat {
    pub backend: wgpu::Backend,
    pub adapter: String,
    pub color: wgpu::TextureFormat,
    pub depth: wgpu::TextureFormat,
    pub frame_latency: u32,
}

/// Depth attachment sized to the drawable.
struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sunburst depth"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// Graphics context bound to the window's drawable surface.
///
/// This type is the low-level rendering context:
/// - negotiates adapter, device and surface format
/// - keeps the surface sized to the framebuffer
/// - holds the acquired back buffer until it is presented
pub struct Gpu {
    /// Surface bound to the window. Holds its own `Arc` to the window.
    surface: wgpu::Surface<'static>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    pixel_format: PixelFormat,
    depth: DepthTarget,
    swap_interval: u32,

    /// Back buffer acquired this frame, presented by `swap_buffers`.
    pending: Option<wgpu::SurfaceTexture>,

    /// Set after an unrecoverable surface error; presentation stops.
    lost: bool,
}

impl Gpu {
    /// Creates a graphics context for `window` with a drawable of `size`
    /// physical pixels.
    ///
    /// Fails unless a hardware adapter, a colour format of at least 24 bits, a
    /// depth format of at least 24 bits and double buffering are all
    /// available. Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: Arc<Window>, size: PhysicalSize<u32>, init: &GpuInit) -> Result<Self> {
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");
        anyhow::ensure!(
            init.desired_maximum_frame_latency >= 2,
            "double buffering needs a frame latency of at least 2, got {}",
            init.desired_maximum_frame_latency
        );
        anyhow::ensure!(
            surface::is_deep_enough(init.depth_format),
            "depth format {:?} has fewer than 24 bits",
            init.depth_format
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        anyhow::ensure!(
            surface::is_hardware(&info),
            "adapter '{}' is not hardware accelerated",
            info.name
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sunburst device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("no surface format with at least 8 bits per colour channel")?;

        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        let swap_interval = 1;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: surface::present_mode_for_interval(swap_interval),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, init.depth_format, size);

        let pixel_format = PixelFormat {
            backend: info.backend,
            adapter: info.name,
            color: format,
            depth: init.depth_format,
            frame_latency: init.desired_maximum_frame_latency,
        };

        log::info!(
            "graphics context: {} via {:?}, {:?} + {:?}, {}x{}",
            pixel_format.adapter,
            pixel_format.backend,
            pixel_format.color,
            pixel_format.depth,
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            pixel_format,
            depth,
            swap_interval,
            pending: None,
            lost: false,
        })
    }

    pub fn pixel_format(&self) -> &PixelFormat {
        &self.pixel_format
    }

    /// Acquires the back buffer (once per frame) and creates an encoder.
    ///
    /// Calling this again before `swap_buffers` reuses the same back buffer.
    pub fn begin_frame(&mut self) -> std::result::Result<GpuFrame, SurfaceError> {
        let texture = match self.pending.take() {
            Some(t) => t,
            None => self.surface.get_current_texture()?,
        };
        let texture = self.pending.insert(texture);

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = self.depth.view.clone();

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sunburst frame encoder"),
            });

        Ok(GpuFrame {
            view,
            depth_view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame.
    ///
    /// The back buffer is not presented until `swap_buffers`.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
    }

    /// Clears the back buffer to `color` and the depth buffer to 1.0.
    pub fn clear(&mut self, color: wgpu::Color) {
        let mut frame = match self.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                self.handle_surface_error(err);
                return;
            }
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sunburst clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &frame.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.submit(frame);
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let reason = err.to_string();
        let action =
            surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err);
        match action {
            SurfaceErrorAction::Fatal => {
                log::error!("surface lost for good ({reason}); presentation stopped");
                self.lost = true;
            }
            SurfaceErrorAction::Reconfigured => log::debug!("surface reconfigured after {reason}"),
            SurfaceErrorAction::SkipFrame => log::debug!("skipping frame: {reason}"),
        }
        action
    }

    fn reconfigure(&mut self) {
        // An outstanding back buffer would block reconfiguration.
        self.pending = None;
        let new_size = self.size;
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }
}

impl GraphicsContext for Gpu {
    /// Reconfigures the surface and depth buffer after a resize.
    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size == self.size {
            return;
        }

        self.pending = None;
        let configured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        if configured {
            self.depth = DepthTarget::new(&self.device, self.pixel_format.depth, new_size);
            log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
        }
    }

    fn set_swap_interval(&mut self, interval: u32) {
        if interval > 1 && self.swap_interval <= 1 {
            log::warn!("swap interval {interval} is presented as 1; wgpu cannot skip vblanks");
        }
        self.swap_interval = interval;

        let mode = surface::present_mode_for_interval(interval);
        if mode != self.config.present_mode {
            self.config.present_mode = mode;
            self.reconfigure();
            log::debug!("present mode set to {mode:?}");
        }
    }

    fn swap_interval(&self) -> u32 {
        self.swap_interval
    }

    fn swap_buffers(&mut self) {
        if self.lost || self.size.width == 0 || self.size.height == 0 {
            return;
        }

        let texture = match self.pending.take() {
            Some(t) => t,
            None => match self.surface.get_current_texture() {
                Ok(t) => t,
                Err(err) => {
                    self.handle_surface_error(err);
                    return;
                }
            },
        };

        texture.present();
    }
}
