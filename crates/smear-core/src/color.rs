use glam::{Vec3, Vec4};

/// Linear RGBA color with normalized channels.
///
/// Values above 1.0 are allowed for HDR-style sources; the kernels never clamp.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn rgb(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Linear interpolation, exact at `t == 0` and `t == 1`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::from(Vec4::from(self) * (1.0 - t) + Vec4::from(other) * t)
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        let f = |c: u8| c as f32 / 255.0;
        Self::new(f(px[0]), f(px[1]), f(px[2]), f(px[3]))
    }
}

impl From<Vec4> for Color4 {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color4> for Vec4 {
    fn from(c: Color4) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}
