/// Straight-alpha RGBA colour with components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0, 1.0)
    }

    /// Clamped, premultiplied components as consumed by the shaders.
    pub fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r.clamp(0.0, 1.0) * a,
            self.g.clamp(0.0, 1.0) * a,
            self.b.clamp(0.0, 1.0) * a,
            a,
        ]
    }

    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = self.premultiplied();
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplied_scales_by_alpha() {
        assert_eq!(Color::rgba(1.0, 0.5, 0.0, 0.5).premultiplied(), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn premultiplied_clamps() {
        assert_eq!(Color::rgba(2.0, -1.0, 0.5, 3.0).premultiplied(), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn from_rgb8_is_opaque() {
        assert_eq!(Color::from_rgb8(255, 0, 255), Color::rgba(1.0, 0.0, 1.0, 1.0));
    }
}
