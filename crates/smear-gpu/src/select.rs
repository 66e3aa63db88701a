use crate::GpuBackend;
use smear_core::{BackendKind, CpuBackend, DistortionBackend, EffectConfig, IdentityBackend};

/// Pick a backend for `kind`, probing the GPU where requested.
///
/// Never fails. `Auto` tries the GPU and falls back to the CPU kernel; an
/// explicit `Gpu` request that cannot be satisfied degrades to the identity
/// pass-through so the host still shows the undistorted source.
pub fn select_backend(kind: BackendKind, config: &EffectConfig) -> Box<dyn DistortionBackend> {
    match kind {
        BackendKind::Identity => Box::new(IdentityBackend),
        BackendKind::Cpu => Box::new(CpuBackend::new(config)),
        BackendKind::Gpu => match GpuBackend::new(config) {
            Ok(g) => Box::new(g),
            Err(e) => {
                log::warn!("[select] GPU unavailable ({e:#}); effect disabled");
                Box::new(IdentityBackend)
            }
        },
        BackendKind::Auto => match GpuBackend::new(config) {
            Ok(g) => Box::new(g),
            Err(e) => {
                log::info!("[select] GPU unavailable ({e:#}); using CPU kernel");
                Box::new(CpuBackend::new(config))
            }
        },
    }
}
