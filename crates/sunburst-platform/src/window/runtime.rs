use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowButtons, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::native_events;
use crate::input::NativeEvent;

use super::backend::{Backend, PlatformEvent};
use super::native::{NativeWindow, WindowSpec};

/// Pumps allowed for a queued window request to be serviced.
const CREATE_ATTEMPTS: usize = 8;

/// Window backed by winit. Shared with the surface that renders into it.
pub struct WinitWindow(Arc<Window>);

impl WinitWindow {
    /// Centers the window on the monitor it currently sits on.
    fn center(&self) {
        let Some(monitor) = self.0.current_monitor() else {
            return;
        };

        let screen = monitor.size();
        let origin = monitor.position();
        let outer = self.0.outer_size();

        let x = origin.x + (screen.width as i32 - outer.width as i32) / 2;
        let y = origin.y + (screen.height as i32 - outer.height as i32) / 2;
        self.0.set_outer_position(PhysicalPosition::new(x.max(origin.x), y.max(origin.y)));
    }
}

impl NativeWindow for WinitWindow {
    fn set_title(&self, title: &str) {
        self.0.set_title(title);
    }

    fn set_content_size(&self, size: LogicalSize<f64>) {
        // The caller resizes the context itself; a later `Resized` is a no-op.
        let _ = self.0.request_inner_size(size);
    }

    fn present(&self) {
        self.0.set_visible(true);
        self.0.focus_window();
    }

    fn hide(&self) {
        self.0.set_visible(false);
    }

    fn content_size(&self) -> LogicalSize<f64> {
        self.0.inner_size().to_logical(self.0.scale_factor())
    }

    fn scale_factor(&self) -> f64 {
        self.0.scale_factor()
    }
}

/// winit-side state, driven from inside `pump_app_events`.
#[derive(Default)]
struct Handler {
    /// Window waiting to be created on the next callback with an active loop.
    request: Option<WindowAttributes>,
    created: Option<Result<Window, OsError>>,

    /// The one window whose events are forwarded.
    window_id: Option<WindowId>,
    scale: f64,

    queue: Vec<PlatformEvent>,

    /// Scratch buffer for translated input.
    native: Vec<NativeEvent>,
}

impl Handler {
    fn service_request(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.request.take() {
            self.created = Some(event_loop.create_window(attrs));
        }
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.service_request(event_loop);
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: winit::event::StartCause) {
        self.service_request(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.service_request(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window_id != Some(window_id) {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.queue.push(PlatformEvent::CloseRequested),

            WindowEvent::Resized(_) => self.queue.push(PlatformEvent::Resized),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale = *scale_factor;
                self.queue.push(PlatformEvent::ScaleFactorChanged);
            }

            _ => {
                native_events(self.scale, &event, &mut self.native);
                self.queue
                    .extend(self.native.drain(..).map(PlatformEvent::Input));
            }
        }
    }
}

/// Desktop backend: winit for windows and events, wgpu for rendering.
///
/// The event loop is never run; it is pumped with a zero timeout from
/// `pump_events`, so the host keeps control of its own frame loop.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    handler: Handler,
    exited: bool,
}

impl WinitBackend {
    /// Creates the process event loop. winit allows one per process.
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        Ok(Self {
            event_loop,
            handler: Handler {
                scale: 1.0,
                ..Default::default()
            },
            exited: false,
        })
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(code) = status {
            log::warn!("winit event loop exited with code {code}");
            self.exited = true;
            if self.handler.window_id.is_some() {
                self.handler.queue.push(PlatformEvent::CloseRequested);
            }
        }
    }
}

fn window_attributes(spec: &WindowSpec) -> WindowAttributes {
    let mut buttons = WindowButtons::MAXIMIZE;
    if spec.closable {
        buttons |= WindowButtons::CLOSE;
    }
    if spec.minimizable {
        buttons |= WindowButtons::MINIMIZE;
    }

    Window::default_attributes()
        .with_title(spec.title.clone())
        .with_inner_size(spec.size)
        .with_resizable(spec.resizable)
        .with_enabled_buttons(buttons)
        .with_visible(false)
}

impl Backend for WinitBackend {
    type Window = WinitWindow;
    type Context = Gpu;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<WinitWindow> {
        anyhow::ensure!(!self.exited, "event loop has exited");

        self.handler.request = Some(window_attributes(spec));
        self.handler.created = None;

        for _ in 0..CREATE_ATTEMPTS {
            self.pump();
            if self.handler.created.is_some() || self.exited {
                break;
            }
        }

        // Leave no stale request behind for a later pump.
        self.handler.request = None;

        let window = self
            .handler
            .created
            .take()
            .context("window system never became active")?
            .context("window system refused to create the window")?;

        self.handler.window_id = Some(window.id());
        self.handler.scale = window.scale_factor();

        let window = WinitWindow(Arc::new(window));
        window.center();
        Ok(window)
    }

    fn create_context(&mut self, window: &WinitWindow, init: &GpuInit) -> Result<Gpu> {
        let size = window.0.inner_size();
        pollster::block_on(Gpu::new(window.0.clone(), size, init))
    }

    fn pump_events(&mut self, out: &mut Vec<PlatformEvent>) {
        self.pump();
        out.append(&mut self.handler.queue);
    }

    fn release_window(&mut self, window: WinitWindow) {
        self.handler.window_id = None;
        self.handler.queue.clear();
        drop(window);
    }
}
