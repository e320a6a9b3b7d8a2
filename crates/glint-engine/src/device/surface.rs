use crate::coords::PixelSize;

use super::SurfaceErrorAction;

pub(super) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    caps.formats.first().copied()
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(super) fn classify_surface_error(err: &wgpu::SurfaceError, size: PixelSize) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated if size.is_valid() => {
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_surface_is_reconfigured_when_visible() {
        let size = PixelSize::new(800, 600);
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Lost, size),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Outdated, size),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn lost_surface_is_skipped_when_minimized() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Lost, PixelSize::new(0, 0)),
            SurfaceErrorAction::SkipFrame
        );
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::OutOfMemory, PixelSize::new(1, 1)),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Timeout, PixelSize::new(1, 1)),
            SurfaceErrorAction::SkipFrame
        );
    }
}
