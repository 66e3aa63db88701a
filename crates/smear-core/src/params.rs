//! Per-frame parameter snapshots and the slot they are published through.

use glam::Vec2;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmearParams {
    pub touch: Vec2,
    pub velocity: Vec2,
    pub viewport: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RippleParams {
    pub touch: Vec2,
    /// Effect strength in [0, 1].
    pub intensity: f32,
    /// Seconds since the effect clock started.
    pub time: f32,
    pub viewport: Vec2,
}

/// Immutable snapshot handed to a kernel for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderParams {
    Smear(SmearParams),
    Ripple(RippleParams),
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self::Smear(SmearParams::default())
    }
}

impl ShaderParams {
    #[inline]
    pub fn viewport(&self) -> Vec2 {
        match self {
            Self::Smear(p) => p.viewport,
            Self::Ripple(p) => p.viewport,
        }
    }

    #[inline]
    pub fn touch(&self) -> Vec2 {
        match self {
            Self::Smear(p) => p.touch,
            Self::Ripple(p) => p.touch,
        }
    }

    /// True when the kernel is guaranteed to reproduce the source exactly.
    pub fn is_idle(&self) -> bool {
        match self {
            Self::Smear(p) => p.velocity == Vec2::ZERO,
            Self::Ripple(p) => p.intensity == 0.0,
        }
    }
}

/// Shared handle through which the input side publishes complete snapshots
/// and the render side reads them.
///
/// Writers replace the whole value under the lock, so a reader never sees a
/// touch position from one update paired with a velocity from another.
#[derive(Clone, Debug, Default)]
pub struct ParamsSlot {
    inner: Arc<Mutex<ShaderParams>>,
}

impl ParamsSlot {
    pub fn new(initial: ShaderParams) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn publish(&self, params: ShaderParams) {
        match self.inner.lock() {
            Ok(mut p) => *p = params,
            Err(poisoned) => *poisoned.into_inner() = params,
        }
    }

    pub fn snapshot(&self) -> ShaderParams {
        match self.inner.lock() {
            Ok(p) => *p,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_detection() {
        assert!(ShaderParams::default().is_idle());
        let p = ShaderParams::Smear(SmearParams {
            velocity: Vec2::new(0.0, 1.0),
            ..Default::default()
        });
        assert!(!p.is_idle());
        let r = ShaderParams::Ripple(RippleParams {
            intensity: 0.0,
            time: 3.0,
            ..Default::default()
        });
        assert!(r.is_idle());
    }

    #[test]
    fn slot_round_trips_across_threads() {
        let slot = ParamsSlot::default();
        let writer = slot.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                let v = i as f32;
                writer.publish(ShaderParams::Smear(SmearParams {
                    touch: Vec2::splat(v),
                    velocity: Vec2::splat(v),
                    viewport: Vec2::new(10.0, 10.0),
                }));
            }
        });
        for _ in 0..100 {
            if let ShaderParams::Smear(p) = slot.snapshot() {
                assert_eq!(p.touch, p.velocity);
            }
        }
        handle.join().expect("writer thread panicked");
        assert_eq!(slot.snapshot().touch(), Vec2::splat(99.0));
    }
}
