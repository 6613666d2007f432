//! Native toolkit adapters.

pub mod winit;
