//! Frame renderers that run a kernel over every pixel of a source raster.
//!
//! Hosts pick one implementation at startup based on what the machine can
//! do. `Compositor` wraps the chosen backend so a failing frame shows the
//! undistorted source instead of a partial result.

use crate::config::EffectConfig;
use crate::kernel::Kernels;
use crate::params::ShaderParams;
use crate::raster::Raster;
use glam::Vec2;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("output is {out_w}x{out_h} but source is {src_w}x{src_h}")]
    SizeMismatch {
        src_w: u32,
        src_h: u32,
        out_w: u32,
        out_h: u32,
    },
    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}

pub trait DistortionBackend: Send {
    fn name(&self) -> &'static str;

    /// Render one frame of `source` distorted by `params` into `out`.
    fn render(
        &mut self,
        source: &Raster,
        params: &ShaderParams,
        out: &mut Raster,
    ) -> Result<(), RenderError>;
}

impl<B: DistortionBackend + ?Sized> DistortionBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render(
        &mut self,
        source: &Raster,
        params: &ShaderParams,
        out: &mut Raster,
    ) -> Result<(), RenderError> {
        (**self).render(source, params, out)
    }
}

/// Requested backend, as chosen by the host or the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// GPU when available, otherwise CPU.
    #[default]
    Auto,
    Gpu,
    Cpu,
    Identity,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
            Self::Identity => "identity",
        };
        f.write_str(s)
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "gpu" => Ok(Self::Gpu),
            "cpu" => Ok(Self::Cpu),
            "identity" | "none" => Ok(Self::Identity),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// Reject an output raster whose dimensions differ from the source.
pub fn check_size(source: &Raster, out: &Raster) -> Result<(), RenderError> {
    if source.width() != out.width() || source.height() != out.height() {
        return Err(RenderError::SizeMismatch {
            src_w: source.width(),
            src_h: source.height(),
            out_w: out.width(),
            out_h: out.height(),
        });
    }
    Ok(())
}

/// Pass-through used when no per-pixel shading is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityBackend;

impl DistortionBackend for IdentityBackend {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn render(
        &mut self,
        source: &Raster,
        _params: &ShaderParams,
        out: &mut Raster,
    ) -> Result<(), RenderError> {
        check_size(source, out)?;
        out.copy_from(source);
        Ok(())
    }
}

/// Reference implementation: evaluates the kernel at every pixel center,
/// one rayon task per row.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend {
    kernels: Kernels,
}

impl CpuBackend {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            kernels: Kernels::from_config(config),
        }
    }

    #[inline]
    pub fn kernels(&self) -> &Kernels {
        &self.kernels
    }
}

impl DistortionBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn render(
        &mut self,
        source: &Raster,
        params: &ShaderParams,
        out: &mut Raster,
    ) -> Result<(), RenderError> {
        check_size(source, out)?;
        if params.is_idle() {
            out.copy_from(source);
            return Ok(());
        }
        let w = source.width() as usize;
        let kernels = self.kernels;
        out.pixels_mut()
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row_out)| {
                let py = y as f32 + 0.5;
                for (x, px) in row_out.iter_mut().enumerate() {
                    *px = kernels.evaluate(Vec2::new(x as f32 + 0.5, py), params, source);
                }
            });
        Ok(())
    }
}

/// Runs a backend and guarantees a whole frame: on failure the source is
/// copied through and the error is logged once per failure streak.
pub struct Compositor {
    backend: Box<dyn DistortionBackend>,
    failing: bool,
}

impl Compositor {
    pub fn new(backend: Box<dyn DistortionBackend>) -> Self {
        log::info!("[compositor] using {} backend", backend.name());
        Self {
            backend,
            failing: false,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Render into `out`; returns whether the distorted frame was produced.
    pub fn render(&mut self, source: &Raster, params: &ShaderParams, out: &mut Raster) -> bool {
        match self.backend.render(source, params, out) {
            Ok(()) => {
                if self.failing {
                    log::info!("[compositor] {} backend recovered", self.backend.name());
                    self.failing = false;
                }
                true
            }
            Err(e) => {
                if !self.failing {
                    log::error!("[compositor] frame failed, showing source: {e}");
                    self.failing = true;
                }
                if out.width() == source.width() && out.height() == source.height() {
                    out.copy_from(source);
                } else {
                    *out = source.clone();
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color4;
    use crate::params::SmearParams;

    struct Broken;

    impl DistortionBackend for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn render(
            &mut self,
            _source: &Raster,
            _params: &ShaderParams,
            out: &mut Raster,
        ) -> Result<(), RenderError> {
            out.set(0, 0, Color4::new(9.0, 9.0, 9.0, 9.0));
            Err(RenderError::Backend {
                backend: "broken",
                message: "device lost".into(),
            })
        }
    }

    fn checker() -> Raster {
        Raster::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Color4::WHITE
            } else {
                Color4::BLACK
            }
        })
    }

    #[test]
    fn backend_kind_parses() {
        assert_eq!("GPU".parse::<BackendKind>(), Ok(BackendKind::Gpu));
        assert_eq!("none".parse::<BackendKind>(), Ok(BackendKind::Identity));
        assert!("metal".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::Cpu.to_string(), "cpu");
    }

    #[test]
    fn size_mismatch_is_reported() {
        let src = checker();
        let mut out = Raster::new(4, 4, Color4::BLACK);
        let err = CpuBackend::default()
            .render(&src, &ShaderParams::default(), &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::SizeMismatch { out_w: 4, .. }));
    }

    #[test]
    fn compositor_falls_back_to_whole_source() {
        let src = checker();
        let mut out = Raster::new(8, 8, Color4::TRANSPARENT);
        let mut comp = Compositor::new(Box::new(Broken));
        let params = ShaderParams::Smear(SmearParams {
            touch: Vec2::new(4.0, 4.0),
            velocity: Vec2::new(30.0, 0.0),
            viewport: src.size(),
        });
        assert!(!comp.render(&src, &params, &mut out));
        assert_eq!(out, src);
    }

    #[test]
    fn compositor_replaces_wrong_sized_output() {
        let src = checker();
        let mut out = Raster::new(3, 3, Color4::TRANSPARENT);
        let mut comp = Compositor::new(Box::new(CpuBackend::default()));
        assert!(!comp.render(&src, &ShaderParams::default(), &mut out));
        assert_eq!(out, src);
    }
}
