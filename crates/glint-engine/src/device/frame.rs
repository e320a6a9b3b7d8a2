/// One acquired surface texture plus the encoder recording into it.
///
/// Hold it only for the duration of a paint: an unreleased surface texture
/// blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
