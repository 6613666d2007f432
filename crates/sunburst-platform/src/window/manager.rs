use anyhow::{Context, Result};
use winit::dpi::{LogicalSize, PhysicalSize};

use crate::device::GraphicsContext;
use crate::input::{translate_event, InputSink};

use super::backend::{Backend, PlatformEvent};
use super::config::PlatformConfig;
use super::native::{framebuffer_size, NativeWindow, WindowSpec};

/// Live window and everything bound to it.
///
/// Field order matters: the context drops before the window it renders into.
struct Created<W, C> {
    context: Option<C>,
    window: W,
    title: String,
    close_requested: bool,
}

enum WindowSlot<W, C> {
    Absent,
    Created(Created<W, C>),
}

/// The platform layer: one window, one graphics context, one event queue.
///
/// All operations run on the UI thread. Operations that need a window (or a
/// context) are silent no-ops without one, so a host can call them every
/// frame regardless of startup order.
pub struct Platform<B: Backend> {
    backend: B,
    config: PlatformConfig,
    slot: WindowSlot<B::Window, B::Context>,

    /// Reused between polls.
    events: Vec<PlatformEvent>,
}

impl<B: Backend> Platform<B> {
    pub fn new(backend: B, config: PlatformConfig) -> Self {
        Self {
            backend,
            config,
            slot: WindowSlot::Absent,
            events: Vec::new(),
        }
    }

    /// Creates the window, or reconfigures the existing one.
    ///
    /// A new window is centered, decorated per the config and titled
    /// `default_title` when `title` is `None`. An existing window only gets
    /// the new title (if any) and size and is brought to the front; its
    /// native handle, context and close flag are kept, and the context is
    /// resized to the new framebuffer straight away.
    ///
    /// Sizes below 1x1 are clamped. Only native window construction fails.
    pub fn init_window(&mut self, width: i32, height: i32, title: Option<&str>) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        let size = LogicalSize::new(f64::from(width), f64::from(height));

        if let WindowSlot::Created(created) = &mut self.slot {
            if let Some(title) = title {
                created.window.set_title(title);
                created.title = title.to_owned();
            }
            created.window.set_content_size(size);
            // Some platforms apply the size synchronously and never report `Resized`.
            if let Some(ctx) = created.context.as_mut() {
                ctx.resize(physical(window_framebuffer(&created.window)));
            }
            created.window.present();
            log::info!("window reconfigured: '{}' {width}x{height}", created.title);
            return Ok(());
        }

        let spec = WindowSpec {
            title: title.unwrap_or(&self.config.default_title).to_owned(),
            size,
            resizable: self.config.resizable,
            closable: self.config.closable,
            minimizable: self.config.minimizable,
        };

        let window = self
            .backend
            .create_window(&spec)
            .context("failed to create window")?;
        window.present();

        log::info!("window created: '{}' {width}x{height}", spec.title);

        self.slot = WindowSlot::Created(Created {
            context: None,
            window,
            title: spec.title,
            close_requested: false,
        });
        Ok(())
    }

    /// Whether the window received a close request. Not cleared by reading.
    pub fn should_close(&self) -> bool {
        match &self.slot {
            WindowSlot::Created(c) => c.close_requested,
            WindowSlot::Absent => false,
        }
    }

    /// Hides and releases the window together with its graphics context.
    ///
    /// Afterwards `init_window` creates fresh objects.
    pub fn destroy(&mut self) {
        let WindowSlot::Created(created) = std::mem::replace(&mut self.slot, WindowSlot::Absent) else {
            return;
        };

        let Created { context, window, title, .. } = created;
        window.hide();
        drop(context);
        self.backend.release_window(window);

        log::info!("window destroyed: '{title}'");
    }

    pub fn set_title(&mut self, title: &str) {
        if let WindowSlot::Created(created) = &mut self.slot {
            created.window.set_title(title);
            created.title = title.to_owned();
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.slot {
            WindowSlot::Created(c) => Some(&c.title),
            WindowSlot::Absent => None,
        }
    }

    /// Size in physical pixels the surface is rendered at.
    pub fn framebuffer_size(&self) -> Option<(i32, i32)> {
        match &self.slot {
            WindowSlot::Created(c) => Some(window_framebuffer(&c.window)),
            WindowSlot::Absent => None,
        }
    }

    pub fn window(&self) -> Option<&B::Window> {
        match &self.slot {
            WindowSlot::Created(c) => Some(&c.window),
            WindowSlot::Absent => None,
        }
    }

    /// Creates the graphics context for the window.
    ///
    /// Fails without a window. Succeeds immediately if a context exists.
    pub fn create_context(&mut self) -> Result<()> {
        let WindowSlot::Created(created) = &mut self.slot else {
            anyhow::bail!("no window to bind a graphics context to");
        };

        if created.context.is_some() {
            return Ok(());
        }

        let context = self
            .backend
            .create_context(&created.window, &self.config.gpu)
            .context("failed to create graphics context")?;
        created.context = Some(context);
        Ok(())
    }

    pub fn context(&self) -> Option<&B::Context> {
        match &self.slot {
            WindowSlot::Created(c) => c.context.as_ref(),
            WindowSlot::Absent => None,
        }
    }

    pub fn context_mut(&mut self) -> Option<&mut B::Context> {
        match &mut self.slot {
            WindowSlot::Created(c) => c.context.as_mut(),
            WindowSlot::Absent => None,
        }
    }

    pub fn swap_buffers(&mut self) {
        if let Some(ctx) = self.context_mut() {
            ctx.swap_buffers();
        }
    }

    /// Sets the swap interval. Negative values are treated as 0.
    pub fn set_swap_interval(&mut self, interval: i32) {
        if let Some(ctx) = self.context_mut() {
            ctx.set_swap_interval(u32::try_from(interval).unwrap_or(0));
        }
    }

    /// Drains the native event queue and dispatches every event.
    ///
    /// Input goes to `sink`; close and resize notifications update the
    /// window state. Nothing is dispatched after this returns.
    pub fn poll_events<S>(&mut self, sink: &mut S)
    where
        S: InputSink + ?Sized,
    {
        let mut events = std::mem::take(&mut self.events);
        self.backend.pump_events(&mut events);

        for event in events.drain(..) {
            self.dispatch(event, sink);
        }

        self.events = events;
    }

    fn dispatch<S>(&mut self, event: PlatformEvent, sink: &mut S)
    where
        S: InputSink + ?Sized,
    {
        match event {
            PlatformEvent::Input(ev) => translate_event(&ev, sink),

            PlatformEvent::CloseRequested => {
                if let WindowSlot::Created(created) = &mut self.slot {
                    if !created.close_requested {
                        created.close_requested = true;
                        log::debug!("close requested for '{}'", created.title);
                    }
                }
            }

            PlatformEvent::Resized | PlatformEvent::ScaleFactorChanged => {
                if let WindowSlot::Created(created) = &mut self.slot {
                    let size = physical(window_framebuffer(&created.window));
                    if let Some(ctx) = created.context.as_mut() {
                        ctx.resize(size);
                    }
                }
            }
        }
    }
}

fn window_framebuffer<W: NativeWindow>(window: &W) -> (i32, i32) {
    framebuffer_size(window.content_size(), window.scale_factor())
}

fn physical((w, h): (i32, i32)) -> PhysicalSize<u32> {
    PhysicalSize::new(w.max(0) as u32, h.max(0) as u32)
}
