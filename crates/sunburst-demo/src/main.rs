use anyhow::Result;
use sunburst_platform::device::GraphicsContext;
use sunburst_platform::input::{InputState, Key, MouseButton};
use sunburst_platform::logging::init_logging;
use sunburst_platform::time::FrameRateCounter;
use sunburst_platform::window::{NativeWindow, Platform, PlatformConfig, WinitBackend};

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;

fn main() -> Result<()> {
    let config = PlatformConfig::default();
    init_logging(config.logging.clone());

    let mut platform = Platform::new(WinitBackend::new()?, config);
    platform.init_window(WIDTH, HEIGHT, Some("sunburst demo"))?;
    platform.create_context()?;

    if let Some(gpu) = platform.context() {
        let pf = gpu.pixel_format();
        log::info!(
            "rendering with {} ({:?}): {:?} colour, {:?} depth, {} frames in flight",
            pf.adapter,
            pf.backend,
            pf.color,
            pf.depth,
            pf.frame_latency
        );
    }

    println!();
    println!("  Esc    quit");
    println!("  V      toggle vsync");
    println!("  mouse  x sets the hue, left button inverts");
    println!();

    let mut input = InputState::new();
    let mut fps = FrameRateCounter::new();

    while !platform.should_close() {
        input.begin_frame();
        platform.poll_events(&mut input);

        if input.key_pressed(Key::Escape) {
            break;
        }

        if input.key_pressed(Key::V) {
            let next = match platform.context().map(|c| c.swap_interval()) {
                Some(0) => 1,
                _ => 0,
            };
            platform.set_swap_interval(next);
            log::info!("vsync {}", if next == 0 { "off" } else { "on" });
        }

        while let Some(c) = input.next_char() {
            log::debug!("typed {c:?}");
        }

        // Pointer coordinates are logical, so compare against the logical width.
        let width = platform.window().map_or(f64::from(WIDTH), |w| w.content_size().width);
        let color = background(input.mouse_position().0, width, input.mouse_down(MouseButton::Left));

        if let Some(gpu) = platform.context_mut() {
            gpu.clear(color);
        }
        platform.swap_buffers();

        if let Some(rate) = fps.tick() {
            platform.set_title(&format!("sunburst demo ({rate:.0} fps)"));
        }
    }

    platform.destroy();
    Ok(())
}

/// Blue-to-orange ramp across the window.
fn background(mouse_x: i32, width: f64, invert: bool) -> wgpu::Color {
    let t = (f64::from(mouse_x) / width.max(1.0)).clamp(0.0, 1.0);
    let (r, g, b) = (0.1 + 0.8 * t, 0.2 + 0.3 * t, 0.8 - 0.7 * t);
    if invert {
        wgpu::Color { r: 1.0 - r, g: 1.0 - g, b: 1.0 - b, a: 1.0 }
    } else {
        wgpu::Color { r, g, b, a: 1.0 }
    }
}
