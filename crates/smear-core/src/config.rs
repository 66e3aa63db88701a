//! Effect tuning bundled into plain structs.
//!
//! Defaults reproduce the reference look; `validate` rejects values that
//! would make the kernels or tracker degenerate.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("effect radius must be positive and finite, got {0}")]
    Radius(f32),
    #[error("tap count must be at least 1")]
    ZeroTaps,
    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("minimum sample interval must be positive, got {0} ms")]
    MinDt(f32),
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
}

/// Which kernel a frame is rendered with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectKind {
    /// Velocity-driven directional smear with chromatic taps.
    #[default]
    Smear,
    /// Intensity/time-driven radial push with a ripple.
    Ripple,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Weight given to the newest raw velocity.
    pub smoothing: f32,
    /// Scale from px/ms to kernel velocity units.
    pub momentum_ms: f32,
    /// Floor on the interval between samples.
    pub min_dt_ms: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing: VELOCITY_SMOOTHING,
            momentum_ms: MOMENTUM_WINDOW_MS,
            min_dt_ms: MIN_SAMPLE_DT_MS,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::Smoothing(self.smoothing));
        }
        if !(self.min_dt_ms > 0.0) {
            return Err(ConfigError::MinDt(self.min_dt_ms));
        }
        finite("momentum_ms", self.momentum_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleConfig {
    pub frequency: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub push_px: f32,
    pub chroma_px: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            frequency: RIPPLE_FREQUENCY,
            speed: RIPPLE_SPEED,
            amplitude: RIPPLE_AMPLITUDE,
            push_px: RIPPLE_PUSH_PX,
            chroma_px: RIPPLE_CHROMA_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectConfig {
    pub kind: EffectKind,
    pub radius: f32,
    pub amplify: f32,
    pub taps: u32,
    pub spread_base: f32,
    pub spread_step: f32,
    pub channel_gap: f32,
    pub ripple: RippleConfig,
    pub tracker: TrackerConfig,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            kind: EffectKind::Smear,
            radius: EFFECT_RADIUS_PX,
            amplify: MOTION_AMPLIFY,
            taps: TAP_COUNT,
            spread_base: TAP_SPREAD_BASE,
            spread_step: TAP_SPREAD_STEP,
            channel_gap: CHANNEL_GAP_VIVID,
            ripple: RippleConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl EffectConfig {
    /// The original, less saturated channel separation.
    pub fn subtle() -> Self {
        Self {
            channel_gap: CHANNEL_GAP_SUBTLE,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: EffectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        if self.taps == 0 {
            return Err(ConfigError::ZeroTaps);
        }
        finite("amplify", self.amplify)?;
        finite("spread_base", self.spread_base)?;
        finite("spread_step", self.spread_step)?;
        finite("channel_gap", self.channel_gap)?;
        finite("ripple.frequency", self.ripple.frequency)?;
        finite("ripple.speed", self.ripple.speed)?;
        finite("ripple.amplitude", self.ripple.amplitude)?;
        finite("ripple.push_px", self.ripple.push_px)?;
        finite("ripple.chroma_px", self.ripple.chroma_px)?;
        self.tracker.validate()
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(EffectConfig::default().validate(), Ok(()));
        assert_eq!(EffectConfig::subtle().validate(), Ok(()));
    }

    #[test]
    fn subtle_only_changes_channel_gap() {
        let s = EffectConfig::subtle();
        assert_eq!(s.channel_gap, CHANNEL_GAP_SUBTLE);
        assert_eq!(
            EffectConfig {
                channel_gap: CHANNEL_GAP_VIVID,
                ..s
            },
            EffectConfig::default()
        );
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut c = EffectConfig::default();
        c.radius = 0.0;
        assert_eq!(c.validate(), Err(ConfigError::Radius(0.0)));

        let mut c = EffectConfig::default();
        c.taps = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroTaps));

        let mut c = EffectConfig::default();
        c.tracker.smoothing = 0.0;
        assert_eq!(c.validate(), Err(ConfigError::Smoothing(0.0)));

        let mut c = EffectConfig::default();
        c.tracker.min_dt_ms = -1.0;
        assert_eq!(c.validate(), Err(ConfigError::MinDt(-1.0)));

        let mut c = EffectConfig::default();
        c.channel_gap = f32::INFINITY;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NotFinite {
                name: "channel_gap",
                ..
            })
        ));
    }
}
