//! C ABI exports.
//!
//! Every export runs on the UI thread. State lives in thread-locals owned by
//! this module; the event loop is created on the first `InitWindow` and kept
//! for the life of the thread.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::ffi::{c_char, CStr};

use crate::device::GraphicsContext;
use crate::input::{InputRecord, InputSink, InputState, Key, MouseButton};
use crate::logging::init_logging;
use crate::time::FrameRateCounter;
use crate::window::{Platform, PlatformConfig, WinitBackend};

/// Colour used by `ClearBackground`.
const BACKGROUND: SbColor = SbColor {
    r: 0.08,
    g: 0.09,
    b: 0.11,
    a: 1.0,
};

/// Host-supplied input sink. Any field may be NULL.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SbInputCallbacks {
    pub key: Option<unsafe extern "C" fn(code: i32, down: bool)>,
    pub mouse: Option<unsafe extern "C" fn(button: i32, down: bool)>,
    pub mouse_pos: Option<unsafe extern "C" fn(x: i32, y: i32)>,
    pub wheel: Option<unsafe extern "C" fn(steps: i32)>,
    pub utf32: Option<unsafe extern "C" fn(codepoint: u32)>,
}

impl InputSink for SbInputCallbacks {
    fn set_key(&mut self, key: Key, down: bool) {
        if let Some(f) = self.key {
            // SAFETY: the host registered `f` with this signature.
            unsafe { f(key.code(), down) }
        }
    }

    fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if let Some(f) = self.mouse {
            // SAFETY: as above.
            unsafe { f(button.code(), down) }
        }
    }

    fn set_mouse_position(&mut self, x: i32, y: i32) {
        if let Some(f) = self.mouse_pos {
            // SAFETY: as above.
            unsafe { f(x, y) }
        }
    }

    fn add_wheel(&mut self, steps: i32) {
        if let Some(f) = self.wheel {
            // SAFETY: as above.
            unsafe { f(steps) }
        }
    }

    fn push_codepoint(&mut self, cp: char) {
        if let Some(f) = self.utf32 {
            // SAFETY: as above.
            unsafe { f(u32::from(cp)) }
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<SbColor> for wgpu::Color {
    fn from(c: SbColor) -> Self {
        wgpu::Color {
            r: f64::from(c.r),
            g: f64::from(c.g),
            b: f64::from(c.b),
            a: f64::from(c.a),
        }
    }
}

#[derive(Default)]
struct HostInput {
    state: InputState,
    callbacks: Option<SbInputCallbacks>,
}

thread_local! {
    static PLATFORM: RefCell<Option<Platform<WinitBackend>>> = const { RefCell::new(None) };
    static INPUT: RefCell<HostInput> = RefCell::new(HostInput::default());
    static FPS: RefCell<FrameRateCounter> = RefCell::new(FrameRateCounter::new());
}

/// Runs `f` on the live platform, or returns `fallback` if there is none.
fn with_platform<R>(fallback: R, f: impl FnOnce(&mut Platform<WinitBackend>) -> R) -> R {
    PLATFORM.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::error!("platform call re-entered from an input callback");
            return fallback;
        };
        match slot.as_mut() {
            Some(platform) => f(platform),
            None => {
                log::trace!("platform call before InitWindow ignored");
                fallback
            }
        }
    })
}

fn with_input<R>(f: impl FnOnce(&mut HostInput) -> R) -> R {
    INPUT.with(|cell| f(&mut cell.borrow_mut()))
}

/// NULL means absent. Invalid UTF-8 is replaced, not rejected.
///
/// # Safety
/// `ptr` must be NULL or point to a NUL-terminated string.
unsafe fn c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let s = unsafe { CStr::from_ptr(ptr) };
    Some(s.to_string_lossy().into_owned())
}

/// # Safety
/// `out` must be NULL or valid for a write.
unsafe fn write_out(out: *mut i32, value: i32) {
    if !out.is_null() {
        // SAFETY: non-null and writable per the caller's contract.
        unsafe { out.write(value) }
    }
}

// ── window ────────────────────────────────────────────────────────────────

/// Creates the window, or retitles/resizes the existing one.
///
/// # Safety
/// `title` must be NULL or a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn InitWindow(width: i32, height: i32, title: *const c_char) -> bool {
    // SAFETY: forwarded from the caller.
    let title = unsafe { c_string(title) };

    PLATFORM.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::error!("InitWindow re-entered from an input callback");
            return false;
        };

        if slot.is_none() {
            let config = PlatformConfig::default();
            init_logging(config.logging.clone());
            match WinitBackend::new() {
                Ok(backend) => *slot = Some(Platform::new(backend, config)),
                Err(e) => {
                    log::error!("platform startup failed: {e:#}");
                    return false;
                }
            }
        }

        let Some(platform) = slot.as_mut() else {
            return false;
        };

        match platform.init_window(width, height, title.as_deref()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("InitWindow failed: {e:#}");
                false
            }
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn CreateGLContext() -> bool {
    with_platform(false, |p| match p.create_context() {
        Ok(()) => true,
        Err(e) => {
            log::error!("CreateGLContext failed: {e:#}");
            false
        }
    })
}

/// Drains pending native events into the input store or the host callbacks.
#[unsafe(no_mangle)]
pub extern "C" fn PollEvents() {
    let mut records: Vec<InputRecord> = Vec::new();
    with_platform((), |p| p.poll_events(&mut records));

    // Callbacks run with no platform or input borrow held, so they may call back in.
    let callbacks = with_input(|input| input.callbacks);
    match callbacks {
        Some(mut sink) => records.into_iter().for_each(|r| sink.deliver(r)),
        None => with_input(|input| records.into_iter().for_each(|r| input.state.deliver(r))),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn WindowShouldClose() -> bool {
    with_platform(false, |p| p.should_close())
}

#[unsafe(no_mangle)]
pub extern "C" fn CloseWindowSB() {
    with_platform((), |p| p.destroy());
}

/// # Safety
/// `title` must be NULL or a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetWindowTitle(title: *const c_char) {
    // SAFETY: forwarded from the caller.
    let Some(title) = (unsafe { c_string(title) }) else {
        return;
    };
    with_platform((), |p| p.set_title(&title));
}

/// Writes the framebuffer size in physical pixels. Leaves both outputs
/// untouched when there is no window.
///
/// # Safety
/// `width` and `height` must each be NULL or valid for a write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetFramebufferSize(width: *mut i32, height: *mut i32) {
    if let Some((w, h)) = with_platform(None, |p| p.framebuffer_size()) {
        // SAFETY: forwarded from the caller.
        unsafe {
            write_out(width, w);
            write_out(height, h);
        }
    }
}

// ── graphics ──────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn GL_SwapBuffers() {
    with_platform((), |p| p.swap_buffers());
}

#[unsafe(no_mangle)]
pub extern "C" fn GL_SetSwapInterval(interval: i32) {
    with_platform((), |p| p.set_swap_interval(interval));
}

/// Clears the back buffer to the default background colour.
#[unsafe(no_mangle)]
pub extern "C" fn ClearBackground() {
    ClearBackgroundColor(BACKGROUND);
}

#[unsafe(no_mangle)]
pub extern "C" fn ClearBackgroundColor(color: SbColor) {
    with_platform((), |p| {
        if let Some(ctx) = p.context_mut() {
            ctx.clear(color.into());
        }
    });
}

/// Logs frames per second once a second. Call once per presented frame.
#[unsafe(no_mangle)]
pub extern "C" fn PrintFrameRate() {
    let fps = FPS.with(|c| c.borrow_mut().tick());
    if let Some(fps) = fps {
        log::info!("FPS: {fps:.1}");
    }
}

/// Current swap interval, or -1 without a context.
#[unsafe(no_mangle)]
pub extern "C" fn GL_GetSwapInterval() -> i32 {
    with_platform(-1, |p| {
        p.context()
            .map_or(-1, |ctx| i32::try_from(ctx.swap_interval()).unwrap_or(i32::MAX))
    })
}

// ── input ─────────────────────────────────────────────────────────────────

/// Routes input to `callbacks` instead of the built-in store. NULL restores
/// the store.
///
/// # Safety
/// `callbacks` must be NULL or point to a valid `SbInputCallbacks`. The
/// struct is copied; the pointer is not retained.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetInputCallbacks(callbacks: *const SbInputCallbacks) {
    // SAFETY: NULL or valid per the caller's contract.
    let callbacks = unsafe { callbacks.as_ref() }.copied();
    with_input(|input| input.callbacks = callbacks);
}

/// Drops per-frame transitions, wheel steps and unread text.
#[unsafe(no_mangle)]
pub extern "C" fn InputBeginFrame() {
    with_input(|input| input.state.begin_frame());
}

fn key_query(code: i32, f: impl FnOnce(&InputState, Key) -> bool) -> bool {
    Key::from_code(code).is_some_and(|key| with_input(|input| f(&input.state, key)))
}

fn button_query(code: i32, f: impl FnOnce(&InputState, MouseButton) -> bool) -> bool {
    MouseButton::from_code(code).is_some_and(|b| with_input(|input| f(&input.state, b)))
}

#[unsafe(no_mangle)]
pub extern "C" fn IsKeyDown(key: i32) -> bool {
    key_query(key, InputState::key_down)
}

#[unsafe(no_mangle)]
pub extern "C" fn IsKeyPressed(key: i32) -> bool {
    key_query(key, InputState::key_pressed)
}

#[unsafe(no_mangle)]
pub extern "C" fn IsKeyReleased(key: i32) -> bool {
    key_query(key, InputState::key_released)
}

#[unsafe(no_mangle)]
pub extern "C" fn IsMouseDown(button: i32) -> bool {
    button_query(button, InputState::mouse_down)
}

#[unsafe(no_mangle)]
pub extern "C" fn IsMousePressed(button: i32) -> bool {
    button_query(button, InputState::mouse_pressed)
}

#[unsafe(no_mangle)]
pub extern "C" fn IsMouseReleased(button: i32) -> bool {
    button_query(button, InputState::mouse_released)
}

/// # Safety
/// `x` and `y` must each be NULL or valid for a write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetMousePosition(x: *mut i32, y: *mut i32) {
    let (px, py) = with_input(|input| input.state.mouse_position());
    // SAFETY: forwarded from the caller.
    unsafe {
        write_out(x, px);
        write_out(y, py);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn GetMouseWheelDelta() -> i32 {
    with_input(|input| input.state.wheel_delta())
}

/// Next typed Unicode scalar, or 0 when none is queued.
#[unsafe(no_mangle)]
pub extern "C" fn GetCharPressed() -> u32 {
    with_input(|input| input.state.next_char()).map_or(0, u32::from)
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::sync::Mutex;

    use super::*;

    // Callbacks are plain fn pointers, so they record into a global.
    static SEEN: Mutex<Vec<String>> = Mutex::new(Vec::new());

    unsafe extern "C" fn on_key(code: i32, down: bool) {
        SEEN.lock().unwrap().push(format!("key {code} {down}"));
    }

    unsafe extern "C" fn on_utf32(cp: u32) {
        SEEN.lock().unwrap().push(format!("text {cp}"));
    }

    // ── without a window ──────────────────────────────────────────────────

    #[test]
    fn queries_before_init_are_inert() {
        assert!(!WindowShouldClose());
        assert!(!CreateGLContext());
        assert_eq!(GL_GetSwapInterval(), -1);

        GL_SwapBuffers();
        GL_SetSwapInterval(0);
        CloseWindowSB();
        ClearBackground();
        PollEvents();
    }

    #[test]
    fn framebuffer_outputs_untouched_without_window() {
        let (mut w, mut h) = (-7, -9);
        unsafe { GetFramebufferSize(&mut w, &mut h) };
        assert_eq!((w, h), (-7, -9));
    }

    #[test]
    fn null_pointers_are_tolerated() {
        unsafe {
            SetWindowTitle(std::ptr::null());
            GetFramebufferSize(std::ptr::null_mut(), std::ptr::null_mut());
            GetMousePosition(std::ptr::null_mut(), std::ptr::null_mut());
            SetInputCallbacks(std::ptr::null());
        }
    }

    // ── strings ───────────────────────────────────────────────────────────

    #[test]
    fn c_strings_convert_lossily() {
        assert_eq!(unsafe { c_string(std::ptr::null()) }, None);

        let ok = CString::new("Demo").unwrap();
        assert_eq!(unsafe { c_string(ok.as_ptr()) }.as_deref(), Some("Demo"));

        let bad = CString::new(vec![b'a', 0xFF, b'b']).unwrap();
        assert_eq!(unsafe { c_string(bad.as_ptr()) }.as_deref(), Some("a\u{FFFD}b"));
    }

    // ── input store ───────────────────────────────────────────────────────

    #[test]
    fn store_answers_queries_by_code() {
        with_input(|input| {
            input.state.set_key(Key::A, true);
            input.state.set_mouse_button(MouseButton::Right, true);
            input.state.set_mouse_position(12, 34);
            input.state.add_wheel(-2);
            input.state.push_codepoint('é');
        });

        assert!(IsKeyDown(Key::A.code()));
        assert!(IsKeyPressed(1));
        assert!(!IsKeyReleased(1));
        assert!(IsMouseDown(1));
        assert!(IsMousePressed(MouseButton::Right.code()));
        assert_eq!(GetMouseWheelDelta(), -2);

        let (mut x, mut y) = (0, 0);
        unsafe { GetMousePosition(&mut x, &mut y) };
        assert_eq!((x, y), (12, 34));

        assert_eq!(GetCharPressed(), 0xE9);
        assert_eq!(GetCharPressed(), 0);

        InputBeginFrame();
        assert!(IsKeyDown(1), "held keys survive the frame boundary");
        assert!(!IsKeyPressed(1));
        assert_eq!(GetMouseWheelDelta(), 0);
    }

    #[test]
    fn out_of_range_codes_are_never_down() {
        assert!(!IsKeyDown(-1));
        assert!(!IsKeyDown(Key::COUNT as i32));
        assert!(!IsMouseDown(99));
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    #[test]
    fn callbacks_receive_records_in_order() {
        let mut sink = SbInputCallbacks {
            key: Some(on_key),
            utf32: Some(on_utf32),
            ..Default::default()
        };

        sink.deliver(InputRecord::Key { key: Key::Escape, pressed: true });
        sink.deliver(InputRecord::Text('H'));
        // No wheel callback registered.
        sink.deliver(InputRecord::Wheel(3));

        let seen = SEEN.lock().unwrap().clone();
        let expected = vec![format!("key {} true", Key::Escape.code()), "text 72".to_string()];
        assert!(seen.windows(2).any(|w| w == expected.as_slice()));
    }

    #[test]
    fn set_callbacks_copies_and_null_restores_store() {
        let callbacks = SbInputCallbacks {
            key: Some(on_key),
            ..Default::default()
        };
        unsafe { SetInputCallbacks(&callbacks) };
        assert!(with_input(|input| input.callbacks.is_some()));

        unsafe { SetInputCallbacks(std::ptr::null()) };
        assert!(with_input(|input| input.callbacks.is_none()));
    }

    #[test]
    fn background_colour_widens_to_wgpu() {
        let c: wgpu::Color = BACKGROUND.into();
        assert!((c.r - 0.08).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
