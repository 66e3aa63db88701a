// Reference tuning for the touch effect. Kernel and tracker defaults are
// built from these; hosts override them through `EffectConfig`.

// Falloff
pub const EFFECT_RADIUS_PX: f32 = 190.0; // effect vanishes at and beyond this distance

// Smear kernel
pub const MOTION_AMPLIFY: f32 = 1.5; // velocity -> motion vector gain
pub const TAP_COUNT: u32 = 10;
pub const TAP_SPREAD_BASE: f32 = 0.175; // fraction of the motion vector for the first tap
pub const TAP_SPREAD_STEP: f32 = 0.005; // per-tap increment
pub const CHANNEL_GAP_VIVID: f32 = 0.06;
pub const CHANNEL_GAP_SUBTLE: f32 = 0.025;

// Ripple kernel
pub const RIPPLE_FREQUENCY: f32 = 40.0; // radians per viewport height
pub const RIPPLE_SPEED: f32 = 6.0; // radians per second
pub const RIPPLE_AMPLITUDE: f32 = 0.003; // viewport-height units
pub const RIPPLE_PUSH_PX: f32 = 18.0; // outward push at full strength
pub const RIPPLE_CHROMA_PX: f32 = 2.5; // symmetric channel split at full strength

// Velocity tracker
pub const VELOCITY_SMOOTHING: f32 = 0.4; // weight of the newest sample
pub const MOMENTUM_WINDOW_MS: f32 = 250.0; // px/ms -> kernel velocity units
pub const MIN_SAMPLE_DT_MS: f32 = 1.0;

// Intensity spring (ripple press/release)
pub const INTENSITY_OMEGA: f32 = 14.0; // natural frequency, rad/s
pub const INTENSITY_DAMPING_RATIO: f32 = 0.8; // 0..1 critical at 1
pub const INTENSITY_SNAP_EPSILON: f32 = 1e-3;
pub const INTENSITY_SUBSTEP_SEC: f32 = 1.0 / 240.0; // longest stable integration step
pub const INTENSITY_MAX_FRAME_SEC: f32 = 0.1; // longer frames (hitches, resume) are clamped
