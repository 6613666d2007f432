//! Time subsystem.
//!
//! Frame-rate reporting for host render loops. Intended usage:
//! - one `FrameRateCounter` per render loop
//! - call `tick()` once per presented frame; it yields a figure once a second

mod frame_rate;

pub use frame_rate::FrameRateCounter;
