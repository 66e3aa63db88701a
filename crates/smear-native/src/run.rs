use crate::cli::Cli;
use crate::script::{DragScript, PointerEvent};
use crate::wallpaper::Wallpaper;
use anyhow::Context;
use glam::Vec2;
use smear_core::{
    BackendKind, Color4, Compositor, DistortionBackend, EffectConfig, GestureController, Raster,
};
use std::path::Path;

#[cfg(feature = "gpu")]
fn make_backend(kind: BackendKind, config: &EffectConfig) -> Box<dyn DistortionBackend> {
    smear_gpu::select_backend(kind, config)
}

#[cfg(not(feature = "gpu"))]
fn make_backend(kind: BackendKind, config: &EffectConfig) -> Box<dyn DistortionBackend> {
    use smear_core::{CpuBackend, IdentityBackend};

    match kind {
        BackendKind::Identity => Box::new(IdentityBackend),
        BackendKind::Cpu | BackendKind::Auto => Box::new(CpuBackend::new(config)),
        BackendKind::Gpu => {
            log::warn!("[run] built without gpu support; effect disabled");
            Box::new(IdentityBackend)
        }
    }
}

fn save_png(frame: &Raster, path: &Path) -> anyhow::Result<()> {
    let img = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
        .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.effect_config()?;
    let (width, height) = (cli.width.max(1), cli.height.max(1));
    let fps = if cli.fps > 0.0 { cli.fps } else { 60.0 };
    let dt = 1.0 / fps;
    let frame_ms = 1000.0 / fps as f64;

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;

    let viewport = Vec2::new(width as f32, height as f32);
    let mut compositor = Compositor::new(make_backend(cli.backend, &config));
    let mut controller = GestureController::new(&config, viewport);
    let slot = controller.slot();
    let script = DragScript::new(viewport, cli.frames);
    let wallpaper = Wallpaper::default();
    let mut out = Raster::new(width, height, Color4::BLACK);

    log::info!(
        "[run] {} frames at {}x{}, {:?} effect, {} backend",
        cli.frames,
        width,
        height,
        config.kind,
        compositor.backend_name()
    );

    let mut fallbacks = 0u32;
    for frame in 0..cli.frames {
        let ts = frame as f64 * frame_ms;
        for event in script.events(frame) {
            match event {
                PointerEvent::Down(p) => controller.pointer_down(p, ts),
                PointerEvent::Move(p) => controller.pointer_move(p, ts),
                PointerEvent::Up => controller.pointer_up(),
            }
        }
        controller.advance(dt);

        let params = slot.snapshot();
        let source = wallpaper.render(width, height, frame as f32 * dt * cli.scroll_speed);
        if !compositor.render(&source, &params, &mut out) {
            fallbacks += 1;
        }

        let path = cli.out.join(format!("frame_{frame:04}.png"));
        save_png(&out, &path)?;
        if frame % 30 == 0 {
            log::debug!("[run] frame {frame} -> {}", path.display());
        }
    }

    if fallbacks > 0 {
        log::warn!("[run] {fallbacks} frame(s) fell back to the undistorted source");
    }
    log::info!("[run] wrote {} frames to {}", cli.frames, cli.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cpu_run_writes_every_frame() {
        let dir = std::env::temp_dir().join(format!("smear-native-test-{}", std::process::id()));
        let cli = Cli::parse_from([
            "smear-native",
            "--width",
            "48",
            "--height",
            "64",
            "--frames",
            "6",
            "--backend",
            "cpu",
            "--out",
            dir.to_str().unwrap(),
        ]);
        run(&cli).unwrap();
        for f in 0..6 {
            assert!(dir.join(format!("frame_{f:04}.png")).exists());
        }
        let img = image::open(dir.join("frame_0000.png")).unwrap();
        assert_eq!((img.width(), img.height()), (48, 64));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
