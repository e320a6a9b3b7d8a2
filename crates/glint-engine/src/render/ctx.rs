use crate::coords::PixelSize;

/// Device, queue and target description shared by the renderers.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub size: PixelSize,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: PixelSize,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            size,
        }
    }
}
