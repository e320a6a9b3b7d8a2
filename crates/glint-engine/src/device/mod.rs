//! GPU device and surface.
//!
//! Creates the wgpu instance, adapter, device and queue for a window,
//! configures its surface, and hands out one [`GpuFrame`] per paint.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
