use clap::{Parser, ValueEnum};
use smear_core::{BackendKind, EffectConfig, EffectKind};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EffectArg {
    Smear,
    Ripple,
}

impl From<EffectArg> for EffectKind {
    fn from(e: EffectArg) -> Self {
        match e {
            EffectArg::Smear => EffectKind::Smear,
            EffectArg::Ripple => EffectKind::Ripple,
        }
    }
}

/// Replay a drag gesture over a scrolling wallpaper and write the frames.
#[derive(Debug, Parser)]
#[command(name = "smear-native", version, about)]
pub struct Cli {
    /// Frame width in pixels
    #[arg(long, default_value_t = 540)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 960)]
    pub height: u32,

    /// Number of frames to render
    #[arg(long, default_value_t = 90)]
    pub frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Which kernel to run
    #[arg(long, value_enum, default_value_t = EffectArg::Smear)]
    pub effect: EffectArg,

    /// auto, gpu, cpu or identity
    #[arg(long, default_value = "auto")]
    pub backend: BackendKind,

    /// Use the softer channel separation
    #[arg(long)]
    pub subtle: bool,

    /// Override the effect radius (pixels)
    #[arg(long)]
    pub radius: Option<f32>,

    /// Override the chromatic channel gap
    #[arg(long)]
    pub channel_gap: Option<f32>,

    /// Wallpaper scroll speed in pixels per second
    #[arg(long, default_value_t = 40.0)]
    pub scroll_speed: f32,

    /// Directory that receives frame_NNNN.png files
    #[arg(long, short, default_value = "frames")]
    pub out: PathBuf,
}

impl Cli {
    /// Defaults with command-line overrides applied, validated.
    pub fn effect_config(&self) -> anyhow::Result<EffectConfig> {
        let mut cfg = if self.subtle {
            EffectConfig::subtle()
        } else {
            EffectConfig::default()
        }
        .with_kind(self.effect.into());
        if let Some(r) = self.radius {
            cfg.radius = r;
        }
        if let Some(g) = self.channel_gap {
            cfg.channel_gap = g;
        }
        cfg.validate()?;
        anyhow::ensure!(self.width > 0 && self.height > 0, "frame size must be non-zero");
        anyhow::ensure!(self.fps > 0.0, "fps must be positive");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smear_core::CHANNEL_GAP_SUBTLE;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "smear-native",
            "--effect",
            "ripple",
            "--backend",
            "cpu",
            "--subtle",
            "--radius",
            "120",
        ]);
        assert_eq!(cli.backend, BackendKind::Cpu);
        let cfg = cli.effect_config().unwrap();
        assert_eq!(cfg.kind, EffectKind::Ripple);
        assert_eq!(cfg.radius, 120.0);
        assert_eq!(cfg.channel_gap, CHANNEL_GAP_SUBTLE);
    }

    #[test]
    fn rejects_invalid_radius() {
        let cli = Cli::parse_from(["smear-native", "--radius", "0"]);
        assert!(cli.effect_config().is_err());
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["smear-native", "--backend", "vulkan"]).is_err());
    }
}
