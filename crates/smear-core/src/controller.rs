//! Glue between pointer callbacks and the per-frame params slot.

use crate::animator::IntensityAnimator;
use crate::config::{EffectConfig, EffectKind};
use crate::params::{ParamsSlot, RippleParams, ShaderParams, SmearParams};
use crate::tracker::VelocityTracker;
use glam::Vec2;

/// Owns the single active gesture and republishes a full snapshot after
/// every state change.
pub struct GestureController {
    kind: EffectKind,
    tracker: VelocityTracker,
    intensity: IntensityAnimator,
    slot: ParamsSlot,
    viewport: Vec2,
    touch: Vec2,
    time_sec: f32,
}

impl GestureController {
    pub fn new(config: &EffectConfig, viewport: Vec2) -> Self {
        let mut c = Self {
            kind: config.kind,
            tracker: VelocityTracker::new(config.tracker),
            intensity: IntensityAnimator::default(),
            slot: ParamsSlot::default(),
            viewport,
            touch: viewport * 0.5,
            time_sec: 0.0,
        };
        c.publish();
        c
    }

    /// Handle readers use to take per-frame snapshots.
    pub fn slot(&self) -> ParamsSlot {
        self.slot.clone()
    }

    #[inline]
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    #[inline]
    pub fn tracker(&self) -> &VelocityTracker {
        &self.tracker
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.publish();
    }

    pub fn pointer_down(&mut self, position: Vec2, timestamp_ms: f64) {
        self.tracker.start_at(position, timestamp_ms);
        self.intensity.press();
        self.touch = position;
        log::debug!("[gesture] down at ({:.1},{:.1})", position.x, position.y);
        self.publish();
    }

    pub fn pointer_move(&mut self, position: Vec2, timestamp_ms: f64) {
        let motion = self.tracker.sample(position, timestamp_ms);
        self.touch = motion.position;
        self.publish();
    }

    pub fn pointer_up(&mut self) {
        self.tracker.end();
        self.intensity.release();
        log::debug!("[gesture] up");
        self.publish();
    }

    /// Advance the ripple clock and intensity spring by one frame.
    pub fn advance(&mut self, dt_sec: f32) {
        self.time_sec += dt_sec.max(0.0);
        self.intensity.step(dt_sec);
        self.publish();
    }

    /// Current state as a complete snapshot.
    pub fn params(&self) -> ShaderParams {
        match self.kind {
            EffectKind::Smear => ShaderParams::Smear(SmearParams {
                touch: self.touch,
                velocity: self.tracker.velocity(),
                viewport: self.viewport,
            }),
            EffectKind::Ripple => ShaderParams::Ripple(RippleParams {
                touch: self.touch,
                intensity: self.intensity.value(),
                time: self.time_sec,
                viewport: self.viewport,
            }),
        }
    }

    fn publish(&mut self) {
        self.slot.publish(self.params());
    }
}
