/// Back buffer acquired for the current frame.
///
/// The surface texture itself stays with the context until `swap_buffers`
/// presents it; this only hands out a view and an encoder to record into.
pub struct GpuFrame {
    pub view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
