//! Graphics context management.
//!
//! This module is responsible for:
//! - negotiating the adapter, device and surface format for the window
//! - keeping the surface and depth buffer sized to the framebuffer
//! - acquiring back buffers, presenting them and swap-interval control

mod context;
mod frame;
mod gpu;
mod init;
mod surface;

pub use context::GraphicsContext;
pub use frame::GpuFrame;
pub use gpu::{Gpu, PixelFormat};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
