/// Surface and device preferences.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available. Image textures are
    /// uploaded as sRGB, so a linear surface darkens them.
    pub prefer_srgb: bool,

    /// FIFO caps presentation at the display rate; the frame scheduler paces
    /// below it.
    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    pub required_limits: wgpu::Limits,

    /// Hint; support depends on platform and backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::default(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
