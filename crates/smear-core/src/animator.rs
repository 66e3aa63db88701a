use crate::constants::{
    INTENSITY_DAMPING_RATIO, INTENSITY_MAX_FRAME_SEC, INTENSITY_OMEGA, INTENSITY_SNAP_EPSILON,
    INTENSITY_SUBSTEP_SEC,
};

/// Damped spring that eases the ripple intensity toward 1 on press and 0 on
/// release.
///
/// Once position and velocity are both within epsilon of the target the
/// value snaps to it exactly, so a released ripple ends at a true zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityAnimator {
    value: f32,
    velocity: f32,
    target: f32,
    omega: f32,
    damping_ratio: f32,
}

impl Default for IntensityAnimator {
    fn default() -> Self {
        Self::new(INTENSITY_OMEGA, INTENSITY_DAMPING_RATIO)
    }
}

impl IntensityAnimator {
    pub fn new(omega: f32, damping_ratio: f32) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            omega,
            damping_ratio,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn press(&mut self) {
        self.target = 1.0;
    }

    pub fn release(&mut self) {
        self.target = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt_sec` with semi-implicit Euler.
    ///
    /// Frames longer than `INTENSITY_MAX_FRAME_SEC` are clamped and every
    /// substep is at most `INTENSITY_SUBSTEP_SEC`, so the integration stays
    /// stable whatever the host reports.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        if self.is_settled() || !(dt_sec > 0.0) {
            return self.value;
        }
        let dt = dt_sec.min(INTENSITY_MAX_FRAME_SEC);
        let k = self.omega * self.omega;
        let c = 2.0 * self.omega * self.damping_ratio;
        let steps = (dt / INTENSITY_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let a = k * (self.target - self.value) - c * self.velocity;
            self.velocity += a * h;
            self.value += self.velocity * h;
        }
        if !(self.value.is_finite() && self.velocity.is_finite()) {
            log::warn!("[intensity] spring diverged, snapping to {}", self.target);
            self.value = self.target;
            self.velocity = 0.0;
            return self.value;
        }
        self.value = self.value.clamp(0.0, 1.0);
        if (self.value - self.target).abs() < INTENSITY_SNAP_EPSILON
            && self.velocity.abs() < INTENSITY_SNAP_EPSILON
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}
