/// Straight-alpha RGBA color with components in `[0, 1]`.
///
/// This engine only ever clears, so no premultiplication or blending
/// conventions apply; the value maps directly onto a clear color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Converts to the f64 color wgpu expects in clear operations.
    ///
    /// Components are clamped to `[0, 1]` here; the const constructors cannot.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r.clamp(0.0, 1.0) as f64,
            g: self.g.clamp(0.0, 1.0) as f64,
            b: self.b.clamp(0.0, 1.0) as f64,
            a: self.a.clamp(0.0, 1.0) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(0.5, 0.0, 0.5).a, 1.0);
    }

    #[test]
    fn to_wgpu_clamps_out_of_range_components() {
        let c = Color::rgba(1.5, -0.25, 0.5, 2.0).to_wgpu();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn converts_to_wgpu_componentwise() {
        let c = Color::rgba(0.5, 0.25, 0.125, 1.0).to_wgpu();
        assert_eq!(c.r, 0.5);
        assert_eq!(c.g, 0.25);
        assert_eq!(c.b, 0.125);
        assert_eq!(c.a, 1.0);
    }
}
