//! Gesture velocity smoothing.
//!
//! A single-pointer state machine: `start` on touch-down, `sample` for every
//! move, `end` on release or cancel. Velocity is exponentially smoothed and
//! forced to exactly zero on release so the kernels fall back to identity.

use crate::config::TrackerConfig;
use glam::Vec2;
use instant::Instant;

/// One input event from the host's pointer dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub position: Vec2,
    pub timestamp_ms: f64,
}

/// Per-gesture state. Owned by exactly one tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityState {
    pub velocity: Vec2,
    pub position: Vec2,
    pub last_timestamp_ms: f64,
    pub active: bool,
}

/// Result of feeding one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

pub struct VelocityTracker {
    config: TrackerConfig,
    state: VelocityState,
    epoch: Instant,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl VelocityTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            state: VelocityState::default(),
            epoch: Instant::now(),
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> VelocityState {
        self.state
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Milliseconds since the tracker was created, on a monotonic clock.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Touch-down using the tracker's own clock.
    ///
    /// Later `sample` calls for this gesture must pass timestamps from
    /// `now_ms()`; hosts with their own event clock use `start_at`.
    pub fn start(&mut self, position: Vec2) {
        let now = self.now_ms();
        self.start_at(position, now);
    }

    /// Touch-down at an explicit host timestamp.
    pub fn start_at(&mut self, position: Vec2, timestamp_ms: f64) {
        self.state = VelocityState {
            velocity: Vec2::ZERO,
            position,
            last_timestamp_ms: timestamp_ms,
            active: true,
        };
        log::trace!("[tracker] start at ({:.1},{:.1})", position.x, position.y);
    }

    /// Feed a move event and return the smoothed motion.
    ///
    /// Duplicate or out-of-order timestamps are absorbed by the `min_dt_ms`
    /// floor. Moves while idle (hover, late events after release) are
    /// ignored; only `start`/`start_at` arm a gesture.
    pub fn sample(&mut self, position: Vec2, timestamp_ms: f64) -> Motion {
        if !self.state.active {
            log::trace!("[tracker] move while idle ignored");
            return self.motion();
        }
        let TrackerConfig {
            smoothing,
            momentum_ms,
            min_dt_ms,
        } = self.config;

        let dt = ((timestamp_ms - self.state.last_timestamp_ms) as f32).max(min_dt_ms);
        let raw = (position - self.state.position) / dt * momentum_ms;
        self.state.velocity = self.state.velocity * (1.0 - smoothing) + raw * smoothing;
        self.state.position = position;
        self.state.last_timestamp_ms = timestamp_ms;

        log::trace!(
            "[tracker] dt={:.1}ms raw=({:.1},{:.1}) v=({:.1},{:.1})",
            dt,
            raw.x,
            raw.y,
            self.state.velocity.x,
            self.state.velocity.y
        );
        self.motion()
    }

    #[inline]
    pub fn push(&mut self, sample: GestureSample) -> Motion {
        self.sample(sample.position, sample.timestamp_ms)
    }

    /// Touch-up or cancel. Velocity becomes exactly zero; no decay.
    pub fn end(&mut self) {
        self.state.velocity = Vec2::ZERO;
        self.state.active = false;
        log::trace!("[tracker] end");
    }

    #[inline]
    fn motion(&self) -> Motion {
        Motion {
            position: self.state.position,
            velocity: self.state.velocity,
        }
    }
}
