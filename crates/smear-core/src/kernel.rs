//! Per-pixel distortion kernels.
//!
//! Both kernels are pure: they read the per-frame params and the source
//! sampler and return one color. Hosts call them once per pixel, in any
//! order and from any number of threads.

use crate::color::Color4;
use crate::config::{EffectConfig, RippleConfig};
use crate::params::{RippleParams, ShaderParams, SmearParams};
use crate::raster::SourceImage;
use glam::{Vec2, Vec3};

/// Quadratic ease-out: 1 at the touch point, 0 at and beyond `radius`.
#[inline]
pub fn falloff(dist: f32, radius: f32) -> f32 {
    let t = (1.0 - dist / radius).clamp(0.0, 1.0);
    t * t
}

/// Directional motion smear with per-channel tap offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmearKernel {
    pub radius: f32,
    pub amplify: f32,
    pub taps: u32,
    pub spread_base: f32,
    pub spread_step: f32,
    pub channel_gap: f32,
}

impl Default for SmearKernel {
    fn default() -> Self {
        Self::from_config(&EffectConfig::default())
    }
}

impl SmearKernel {
    pub fn from_config(cfg: &EffectConfig) -> Self {
        Self {
            radius: cfg.radius,
            amplify: cfg.amplify,
            taps: cfg.taps.max(1),
            spread_base: cfg.spread_base,
            spread_step: cfg.spread_step,
            channel_gap: cfg.channel_gap,
        }
    }

    /// Displacement applied at `pixel`; trails opposite the drag.
    #[inline]
    pub fn motion_vector(&self, pixel: Vec2, params: &SmearParams) -> Vec2 {
        let dist = params.touch.distance(pixel);
        -params.velocity * falloff(dist, self.radius) * self.amplify
    }

    pub fn evaluate<S: SourceImage + ?Sized>(
        &self,
        pixel: Vec2,
        params: &SmearParams,
        source: &S,
    ) -> Color4 {
        let m = self.motion_vector(pixel, params);
        if m == Vec2::ZERO {
            return source.sample(pixel);
        }

        let g = self.channel_gap;
        let mut acc = Vec3::ZERO;
        for i in 0..self.taps {
            let s = self.spread_base + self.spread_step * i as f32;
            let r = source.sample(pixel + m * s).r;
            let gr = source.sample(pixel + m * (s + g)).g;
            let b = source.sample(pixel + m * (s + 2.0 * g)).b;
            acc += Vec3::new(r, gr, b);
        }
        let rgb = acc / self.taps as f32;
        Color4::opaque(rgb.x, rgb.y, rgb.z)
    }
}

/// Radial push with a travelling ripple and a symmetric channel split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleKernel {
    pub radius: f32,
    pub ripple: RippleConfig,
}

impl Default for RippleKernel {
    fn default() -> Self {
        Self::from_config(&EffectConfig::default())
    }
}

impl RippleKernel {
    pub fn from_config(cfg: &EffectConfig) -> Self {
        Self {
            radius: cfg.radius,
            ripple: cfg.ripple,
        }
    }

    /// Falloff scaled by the animated intensity.
    #[inline]
    pub fn strength(&self, pixel: Vec2, params: &RippleParams) -> f32 {
        falloff(params.touch.distance(pixel), self.radius) * params.intensity
    }

    pub fn evaluate<S: SourceImage + ?Sized>(
        &self,
        pixel: Vec2,
        params: &RippleParams,
        source: &S,
    ) -> Color4 {
        let f = self.strength(pixel, params);
        if f == 0.0 {
            return source.sample(pixel);
        }

        let RippleConfig {
            frequency,
            speed,
            amplitude,
            push_px,
            chroma_px,
        } = self.ripple;

        let offset = pixel - params.touch;
        let dist = offset.length();
        let normal = offset.normalize_or_zero();
        let unit = params.viewport.y.max(1.0);

        let wave = (dist / unit * frequency - params.time * speed).sin() * amplitude * f;
        let push = push_px * f + wave * unit;
        let base = pixel - normal * push;
        let split = normal * (chroma_px * f);

        let r = source.sample(base + split).r;
        let g = source.sample(base).g;
        let b = source.sample(base - split).b;
        Color4::opaque(r, g, b)
    }
}

/// Both kernels, dispatched on the params variant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Kernels {
    pub smear: SmearKernel,
    pub ripple: RippleKernel,
}

impl Kernels {
    pub fn from_config(cfg: &EffectConfig) -> Self {
        Self {
            smear: SmearKernel::from_config(cfg),
            ripple: RippleKernel::from_config(cfg),
        }
    }

    #[inline]
    pub fn evaluate<S: SourceImage + ?Sized>(
        &self,
        pixel: Vec2,
        params: &ShaderParams,
        source: &S,
    ) -> Color4 {
        match params {
            ShaderParams::Smear(p) => self.smear.evaluate(pixel, p, source),
            ShaderParams::Ripple(p) => self.ripple.evaluate(pixel, p, source),
        }
    }
}
