//! Source images and the clamp-to-edge sampler the kernels read from.
//!
//! Coordinates are continuous pixel coordinates with the origin at the
//! top-left corner, so the center of pixel `(x, y)` is `(x + 0.5, y + 0.5)`.
//! This matches the fragment position convention used by the WGSL kernels.

use crate::color::Color4;
use glam::Vec2;

/// Read-only 2D sampler. Implementations own their boundary policy.
pub trait SourceImage {
    fn sample(&self, pos: Vec2) -> Color4;
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    #[inline]
    fn sample(&self, pos: Vec2) -> Color4 {
        (**self).sample(pos)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    Nearest,
    Linear,
}

/// Row-major RGBA float image.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    filter: Filter,
    pixels: Vec<Color4>,
}

impl Raster {
    /// Create a raster filled with `fill`. Zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32, fill: Color4) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            filter: Filter::Nearest,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color4) -> Self {
        let mut r = Self::new(width, height, Color4::TRANSPARENT);
        for y in 0..r.height {
            for x in 0..r.width {
                let i = r.index(x, y);
                r.pixels[i] = f(x, y);
            }
        }
        r
    }

    /// Wrap existing pixels; returns `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color4>) -> Option<Self> {
        (width > 0 && height > 0 && pixels.len() == width as usize * height as usize).then_some(
            Self {
                width,
                height,
                filter: Filter::Nearest,
                pixels,
            },
        )
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    #[inline]
    pub fn pixels(&self) -> &[Color4] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color4] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color4 {
        self.pixels[self.index(x.min(self.width - 1), y.min(self.height - 1))]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: Color4) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = c;
        }
    }

    /// Fetch with integer coordinates clamped to the edge.
    #[inline]
    fn fetch_clamped(&self, x: i64, y: i64) -> Color4 {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixels[self.index(cx, cy)]
    }

    /// Copy another raster of identical size into this one.
    pub fn copy_from(&mut self, other: &Raster) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.pixels.copy_from_slice(&other.pixels);
        true
    }

    /// Tightly packed RGBA8 bytes, suitable for PNG encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

impl SourceImage for Raster {
    fn sample(&self, pos: Vec2) -> Color4 {
        // NaN coordinates collapse to the top-left texel via the saturating cast.
        match self.filter {
            Filter::Nearest => self.fetch_clamped(pos.x.floor() as i64, pos.y.floor() as i64),
            Filter::Linear => {
                let p = pos - Vec2::splat(0.5);
                let x0 = p.x.floor();
                let y0 = p.y.floor();
                let tx = p.x - x0;
                let ty = p.y - y0;
                let (xi, yi) = (x0 as i64, y0 as i64);
                let top = self
                    .fetch_clamped(xi, yi)
                    .lerp(self.fetch_clamped(xi + 1, yi), tx);
                let bottom = self
                    .fetch_clamped(xi, yi + 1)
                    .lerp(self.fetch_clamped(xi + 1, yi + 1), tx);
                top.lerp(bottom, ty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Raster {
        Raster::from_fn(4, 3, |x, y| Color4::opaque(x as f32 / 3.0, y as f32 / 2.0, 0.5))
    }

    #[test]
    fn nearest_reads_pixel_at_center() {
        let r = ramp();
        assert_eq!(r.sample(Vec2::new(2.5, 1.5)), r.get(2, 1));
    }

    #[test]
    fn out_of_bounds_clamps_to_edge() {
        let r = ramp();
        assert_eq!(r.sample(Vec2::new(-40.0, -3.0)), r.get(0, 0));
        assert_eq!(r.sample(Vec2::new(1e6, 1e6)), r.get(3, 2));
        assert_eq!(r.sample(Vec2::new(1.5, 99.0)), r.get(1, 2));
    }

    #[test]
    fn linear_is_exact_at_pixel_centers() {
        let r = ramp().with_filter(Filter::Linear);
        for y in 0..3 {
            for x in 0..4 {
                let c = r.sample(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                assert_eq!(c, r.get(x, y));
            }
        }
    }

    #[test]
    fn linear_blends_between_neighbours() {
        let r = Raster::from_fn(2, 1, |x, _| Color4::opaque(x as f32, 0.0, 0.0))
            .with_filter(Filter::Linear);
        let c = r.sample(Vec2::new(1.0, 0.5));
        assert!((c.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(Raster::from_pixels(2, 2, vec![Color4::BLACK; 3]).is_none());
        assert!(Raster::from_pixels(2, 2, vec![Color4::BLACK; 4]).is_some());
    }
}
