//! GPU-side parameter layouts matching `shaders/*.wgsl`.
//!
//! Both structs are 48 bytes: three 8-byte-aligned `vec2<f32>` slots followed
//! by scalars, which satisfies WGSL uniform layout without manual padding.

use crate::config::EffectConfig;
use crate::params::{RippleParams, SmearParams};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SmearUniforms {
    pub touch: [f32; 2],
    pub velocity: [f32; 2],
    pub resolution: [f32; 2],
    pub radius: f32,
    pub amplify: f32,
    pub spread_base: f32,
    pub spread_step: f32,
    pub channel_gap: f32,
    pub taps: u32,
}

impl SmearUniforms {
    pub fn new(params: &SmearParams, cfg: &EffectConfig) -> Self {
        Self {
            touch: params.touch.to_array(),
            velocity: params.velocity.to_array(),
            resolution: params.viewport.to_array(),
            radius: cfg.radius,
            amplify: cfg.amplify,
            spread_base: cfg.spread_base,
            spread_step: cfg.spread_step,
            channel_gap: cfg.channel_gap,
            taps: cfg.taps.max(1),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RippleUniforms {
    pub touch: [f32; 2],
    pub resolution: [f32; 2],
    pub intensity: f32,
    pub time: f32,
    pub radius: f32,
    pub push_px: f32,
    pub frequency: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub chroma_px: f32,
}

impl RippleUniforms {
    pub fn new(params: &RippleParams, cfg: &EffectConfig) -> Self {
        Self {
            touch: params.touch.to_array(),
            resolution: params.viewport.to_array(),
            intensity: params.intensity,
            time: params.time,
            radius: cfg.radius,
            push_px: cfg.ripple.push_px,
            frequency: cfg.ripple.frequency,
            speed: cfg.ripple.speed,
            amplitude: cfg.ripple.amplitude,
            chroma_px: cfg.ripple.chroma_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn layouts_are_uniform_sized() {
        assert_eq!(std::mem::size_of::<SmearUniforms>(), 48);
        assert_eq!(std::mem::size_of::<RippleUniforms>(), 48);
    }

    #[test]
    fn smear_uniforms_copy_params() {
        let p = SmearParams {
            touch: Vec2::new(1.0, 2.0),
            velocity: Vec2::new(3.0, 4.0),
            viewport: Vec2::new(640.0, 480.0),
        };
        let u = SmearUniforms::new(&p, &EffectConfig::subtle());
        assert_eq!(u.velocity, [3.0, 4.0]);
        assert_eq!(u.channel_gap, crate::constants::CHANNEL_GAP_SUBTLE);
        assert_eq!(u.taps, 10);
        assert_eq!(bytemuck::bytes_of(&u).len(), 48);
    }
}
