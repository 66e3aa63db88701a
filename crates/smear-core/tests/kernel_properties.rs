// Host-side checks for the distortion kernels' documented properties.

use glam::Vec2;
use rand::prelude::*;
use smear_core::*;

fn noise_raster(seed: u64, w: u32, h: u32) -> Raster {
    let mut rng = StdRng::seed_from_u64(seed);
    Raster::from_fn(w, h, |_, _| {
        Color4::new(rng.gen(), rng.gen(), rng.gen(), rng.gen_range(0.2..1.0))
    })
}

#[test]
fn falloff_matches_reference_points() {
    let r = EFFECT_RADIUS_PX;
    assert_eq!(falloff(0.0, r), 1.0);
    assert_eq!(falloff(r, r), 0.0);
    assert_eq!(falloff(r / 2.0, r), 0.25);
}

#[test]
fn falloff_is_monotonic_and_zero_beyond_radius() {
    let r = EFFECT_RADIUS_PX;
    let mut prev = falloff(0.0, r);
    for i in 1..=1900 {
        let d = i as f32 * 0.1;
        let f = falloff(d, r);
        assert!(f <= prev, "falloff increased at dist {d}");
        assert!((0.0..=1.0).contains(&f));
        prev = f;
    }
    for d in [190.0, 190.001, 250.0, 1e4, f32::INFINITY] {
        assert_eq!(falloff(d, r), 0.0, "dist {d}");
    }
}

#[test]
fn falloff_scenario_touch_500_800() {
    let touch = Vec2::new(500.0, 800.0);
    let pixel = Vec2::new(500.0, 700.0);
    let dist = touch.distance(pixel);
    assert_eq!(dist, 100.0);
    let f = falloff(dist, 190.0);
    let expected = (1.0f32 - 100.0 / 190.0).powi(2);
    assert!((f - expected).abs() < 1e-6);
    assert!((f - 0.2244).abs() < 1e-4);
}

#[test]
fn motion_vector_at_touch_point_is_velocity_times_amplify() {
    let k = SmearKernel::default();
    let params = SmearParams {
        touch: Vec2::new(120.0, 80.0),
        velocity: Vec2::new(30.0, -40.0),
        viewport: Vec2::new(400.0, 300.0),
    };
    let m = k.motion_vector(params.touch, &params);
    assert_eq!(m, Vec2::new(-45.0, 60.0));
    assert!((m.length() - params.velocity.length() * 1.5).abs() < 1e-4);
}

#[test]
fn smear_is_identity_when_velocity_is_zero() {
    let src = noise_raster(7, 48, 32);
    let k = SmearKernel::default();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let params = SmearParams {
            touch: Vec2::new(rng.gen_range(-50.0..100.0), rng.gen_range(-50.0..80.0)),
            velocity: Vec2::ZERO,
            viewport: src.size(),
        };
        let p = Vec2::new(rng.gen_range(0.0..48.0), rng.gen_range(0.0..32.0));
        assert_eq!(k.evaluate(p, &params, &src), src.sample(p));
    }
}

#[test]
fn smear_is_identity_outside_radius() {
    let src = noise_raster(3, 64, 64);
    let k = SmearKernel {
        radius: 10.0,
        ..SmearKernel::default()
    };
    let params = SmearParams {
        touch: Vec2::new(5.0, 5.0),
        velocity: Vec2::new(400.0, 250.0),
        viewport: src.size(),
    };
    let p = Vec2::new(40.5, 40.5);
    assert_eq!(k.evaluate(p, &params, &src), src.get(40, 40));
}

#[test]
fn smear_output_is_always_opaque() {
    let src = noise_raster(11, 32, 32);
    let k = SmearKernel::default();
    let params = SmearParams {
        touch: Vec2::new(16.0, 16.0),
        velocity: Vec2::new(-12.0, 9.0),
        viewport: src.size(),
    };
    for y in 0..32 {
        for x in 0..32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let c = k.evaluate(p, &params, &src);
            assert_eq!(c.a, 1.0);
        }
    }
}

#[test]
fn smear_trails_opposite_the_drag() {
    // Brightness ramps up to the right. Dragging right samples to the
    // left, so the touched pixel gets darker.
    let src = Raster::from_fn(200, 4, |x, _| {
        let v = x as f32 / 199.0;
        Color4::opaque(v, v, v)
    });
    let k = SmearKernel::default();
    let touch = Vec2::new(100.5, 2.5);
    let params = SmearParams {
        touch,
        velocity: Vec2::new(100.0, 0.0),
        viewport: src.size(),
    };
    let c = k.evaluate(touch, &params, &src);
    let original = src.sample(touch);
    assert!(c.r < original.r && c.g < original.g && c.b < original.b);
    // Blue is displaced furthest, so it is darkest.
    assert!(c.b < c.g && c.g < c.r);
}

#[test]
fn ripple_is_identity_when_intensity_is_zero() {
    let src = noise_raster(5, 40, 40);
    let k = RippleKernel::default();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..300 {
        let params = RippleParams {
            touch: Vec2::new(rng.gen_range(0.0..40.0), rng.gen_range(0.0..40.0)),
            intensity: 0.0,
            time: rng.gen_range(0.0..10.0),
            viewport: src.size(),
        };
        let p = Vec2::new(rng.gen_range(0.0..40.0), rng.gen_range(0.0..40.0));
        assert_eq!(k.evaluate(p, &params, &src), src.sample(p));
    }
}

#[test]
fn ripple_pushes_content_outward() {
    // Vertical ramp; a pixel below the touch point samples from closer to
    // the touch, i.e. from above, so it reads a smaller green value.
    let src = Raster::from_fn(8, 400, |_, y| Color4::opaque(0.0, y as f32 / 399.0, 0.0));
    let k = RippleKernel::default();
    let params = RippleParams {
        touch: Vec2::new(4.0, 200.0),
        intensity: 1.0,
        time: 0.0,
        viewport: src.size(),
    };
    let p = Vec2::new(4.0, 240.5);
    let c = k.evaluate(p, &params, &src);
    assert!(c.g < src.sample(p).g);
    assert_eq!(c.a, 1.0);
}

#[test]
fn kernels_dispatch_on_params_variant() {
    let src = noise_raster(21, 24, 24);
    let kernels = Kernels::from_config(&EffectConfig::default());
    let smear = SmearParams {
        touch: Vec2::new(12.0, 12.0),
        velocity: Vec2::new(8.0, 3.0),
        viewport: src.size(),
    };
    let ripple = RippleParams {
        touch: Vec2::new(12.0, 12.0),
        intensity: 0.7,
        time: 0.4,
        viewport: src.size(),
    };
    let p = Vec2::new(10.5, 13.5);
    assert_eq!(
        kernels.evaluate(p, &ShaderParams::Smear(smear), &src),
        kernels.smear.evaluate(p, &smear, &src)
    );
    assert_eq!(
        kernels.evaluate(p, &ShaderParams::Ripple(ripple), &src),
        kernels.ripple.evaluate(p, &ripple, &src)
    );
}
