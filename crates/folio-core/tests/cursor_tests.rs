// Host-side tests for the cursor trail, driven by synthetic frames and a seeded RNG.

use folio_core::constants::*;
use folio_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_effect(seed: u64) -> CursorEffect<StdRng> {
    CursorEffect::new(StdRng::seed_from_u64(seed))
}

// Move the pointer along a diagonal until `n` particles have spawned.
fn spawn_particles(effect: &mut CursorEffect<StdRng>, n: usize) {
    let mut spawned = 0;
    let mut step = 0.0_f32;
    while spawned < n {
        if effect.pointer_moved(Vec2::new(step, step), false).is_some() {
            spawned += 1;
        }
        step += 1.0;
        assert!(step < 100_000.0, "spawn probability never fired");
    }
}

#[test]
fn particle_lifetime_drops_by_one_per_frame() {
    let mut effect = make_effect(7);
    spawn_particles(&mut effect, 1);
    let before: Vec<u32> = effect.trail().iter().map(|p| p.life).collect();
    drive(&mut SyntheticTicks::at_60hz(1), &mut effect);
    let after: Vec<u32> = effect.trail().iter().map(|p| p.life).collect();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(*a, b - 1);
    }
}

#[test]
fn particle_is_removed_when_life_reaches_zero() {
    let mut effect = make_effect(11);
    spawn_particles(&mut effect, 1);
    drive(
        &mut SyntheticTicks::at_60hz(u64::from(PARTICLE_LIFE_FRAMES) - 1),
        &mut effect,
    );
    assert_eq!(effect.trail().len(), 1);
    assert_eq!(effect.trail().newest().map(|p| p.life), Some(1));
    drive(&mut SyntheticTicks::at_60hz(1), &mut effect);
    assert!(effect.trail().is_empty(), "expired particle should be dropped");
}

#[test]
fn particle_motion_applies_velocity_then_damping() {
    let mut p = Particle {
        id: 0,
        position: Vec2::new(10.0, 10.0),
        velocity: Vec2::new(2.0, -1.0),
        life: 3,
        max_life: 60,
        size: 2.0,
        hue: 300.0,
    };
    assert!(p.step());
    assert_eq!(p.position, Vec2::new(12.0, 9.0));
    assert!((p.velocity.x - 2.0 * PARTICLE_DAMPING).abs() < 1e-6);
    assert!((p.velocity.y + PARTICLE_DAMPING).abs() < 1e-6);
    assert_eq!(p.life, 2);
}

#[test]
fn lifetime_never_goes_negative() {
    let mut p = Particle {
        id: 0,
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        life: 0,
        max_life: 60,
        size: 1.0,
        hue: 280.0,
    };
    assert!(!p.step());
    assert_eq!(p.life, 0);
    assert_eq!(p.opacity(), 0.0);
}

#[test]
fn trail_never_exceeds_capacity() {
    let mut effect = make_effect(3);
    for i in 0..5_000 {
        effect.pointer_moved(Vec2::new(i as f32, 0.0), false);
        assert!(effect.trail().len() <= TRAIL_CAPACITY);
    }
    assert_eq!(effect.trail().len(), TRAIL_CAPACITY);
}

#[test]
fn trail_evicts_oldest_first() {
    let mut trail = ParticleTrail::with_capacity(3);
    for id in 0..5 {
        trail.push(Particle {
            id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 60,
            max_life: 60,
            size: 1.0,
            hue: 300.0,
        });
    }
    let ids: Vec<u64> = trail.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[test]
fn spawned_attributes_stay_in_range() {
    let mut effect = make_effect(99);
    spawn_particles(&mut effect, TRAIL_CAPACITY);
    for p in effect.trail().iter() {
        assert!(p.velocity.x >= -PARTICLE_SPEED_MAX && p.velocity.x <= PARTICLE_SPEED_MAX);
        assert!(p.velocity.y >= -PARTICLE_SPEED_MAX && p.velocity.y <= PARTICLE_SPEED_MAX);
        assert!(p.size >= PARTICLE_SIZE_MIN && p.size <= PARTICLE_SIZE_MAX);
        assert!(p.hue >= PARTICLE_HUE_MIN && p.hue <= PARTICLE_HUE_MAX);
        assert_eq!(p.life, PARTICLE_LIFE_FRAMES);
        assert_eq!(p.max_life, PARTICLE_LIFE_FRAMES);
    }
}

#[test]
fn spawn_rate_is_roughly_thirty_percent() {
    let mut effect = make_effect(2024);
    let moves = 10_000;
    let mut spawned = 0;
    for i in 0..moves {
        if effect.pointer_moved(Vec2::new(i as f32, 0.0), false).is_some() {
            spawned += 1;
        }
    }
    let rate = spawned as f64 / moves as f64;
    assert!((rate - SPAWN_PROBABILITY).abs() < 0.03, "spawn rate {rate}");
}

#[test]
fn same_seed_and_pointer_path_reproduce_the_trail() {
    let path: Vec<Vec2> = (0..200)
        .map(|i| Vec2::new(i as f32 * 3.0, (i as f32 * 0.1).sin() * 50.0))
        .collect();
    let run = |seed: u64| {
        let mut effect = make_effect(seed);
        for (i, pos) in path.iter().enumerate() {
            effect.pointer_moved(*pos, false);
            if i % 4 == 0 {
                drive(&mut SyntheticTicks::at_60hz(1), &mut effect);
            }
        }
        effect.trail().iter().cloned().collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}

#[test]
fn pointer_leave_hides_but_particles_keep_decaying() {
    let mut effect = make_effect(17);
    spawn_particles(&mut effect, 2);
    effect.pointer_left();
    assert!(!effect.is_visible());
    assert!(!effect.is_hovering());
    let before: u32 = effect.trail().iter().map(|p| p.life).sum();
    drive(&mut SyntheticTicks::at_60hz(5), &mut effect);
    let after: u32 = effect.trail().iter().map(|p| p.life).sum();
    assert!(after < before);
    let layers = effect.layers();
    assert_eq!(layers.glyph_opacity, 0.0);
    assert_eq!(layers.halo_opacity, 0.0);
    assert_eq!(layers.trail_light_opacity, 0.0);
}

#[test]
fn hover_flag_follows_interactive_targets() {
    let mut effect = make_effect(1);
    effect.pointer_moved(Vec2::new(5.0, 5.0), true);
    assert!(effect.is_hovering());
    assert_eq!(effect.layers().halo_opacity, HALO_OPACITY_HOVER);
    effect.pointer_moved(Vec2::new(6.0, 5.0), false);
    assert!(!effect.is_hovering());
    assert_eq!(effect.layers().halo_opacity, HALO_OPACITY_IDLE);
}

#[test]
fn hover_scale_eases_towards_target() {
    let mut effect = make_effect(1);
    effect.pointer_moved(Vec2::new(5.0, 5.0), true);
    drive(&mut SyntheticTicks::at_60hz(1), &mut effect);
    let mid = effect.layers().glyph_scale;
    assert!(mid > 1.0 && mid < GLYPH_HOVER_SCALE);
    drive(&mut SyntheticTicks::at_60hz(30), &mut effect);
    assert!((effect.layers().glyph_scale - GLYPH_HOVER_SCALE).abs() < 1e-4);
}

#[test]
fn interactive_lookup_walks_ancestors() {
    // span inside a link
    assert!(is_interactive([("SPAN", None), ("A", None), ("BODY", None)]));
    // div with a button role
    assert!(is_interactive([("svg", None), ("DIV", Some("button"))]));
    assert!(!is_interactive([("P", None), ("DIV", Some("region")), ("BODY", None)]));
    assert!(!is_interactive(std::iter::empty::<(&str, Option<&str>)>()));
}

#[test]
fn followers_settle_on_the_pointer() {
    let mut effect = make_effect(4);
    effect.pointer_moved(Vec2::new(0.0, 0.0), false);
    effect.pointer_moved(Vec2::new(300.0, 120.0), false);
    drive(&mut SyntheticTicks::at_60hz(600), &mut effect);
    let layers = effect.layers();
    for center in [
        layers.glyph_center,
        layers.halo_center,
        layers.trail_light_center,
    ] {
        assert!(center.distance(Vec2::new(300.0, 120.0)) < 0.5, "{center:?}");
    }
}

#[test]
fn glyph_pose_is_periodic() {
    use std::time::Duration;
    let a = GlyphPose::at(Duration::from_millis(500));
    let b = GlyphPose::at(Duration::from_millis(8_500));
    assert!((a.ring_rotation - b.ring_rotation).abs() < 1e-3);
    assert!((a.pulse_scale - b.pulse_scale).abs() < 1e-3);
    for (da, db) in a.orbit.iter().zip(b.orbit.iter()) {
        assert!(da.distance(*db) < 1e-2);
        assert!((da.length() - ORBIT_RADIUS).abs() < 1e-3);
    }
    let start = GlyphPose::at(Duration::ZERO);
    assert_eq!(start.pulse_scale, 1.0);
    assert!((start.pulse_opacity - 0.8).abs() < 1e-6);
}

#[test]
fn long_hidden_frame_is_clamped_like_a_short_one() {
    use std::time::Duration;
    let run = |dt: Duration| {
        let mut effect = make_effect(8);
        effect.pointer_moved(Vec2::ZERO, false);
        effect.pointer_moved(Vec2::new(400.0, 250.0), false);
        effect.advance(&FrameTick { index: 0, dt });
        effect.layers()
    };
    let day = run(Duration::from_secs(86_400));
    let clamped = run(Duration::from_secs_f32(CURSOR_MAX_FRAME_DT_SEC));
    assert!(day.glyph_center.is_finite());
    assert!(day.glyph_center.distance(clamped.glyph_center) < 1e-2);
    assert!(day.halo_center.distance(clamped.halo_center) < 1e-2);
    assert!(day.trail_light_center.distance(clamped.trail_light_center) < 1e-2);
}

#[test]
fn spring_ignores_non_positive_and_nan_steps() {
    let mut spring = Spring2::new(GLYPH_SPRING);
    spring.step(Vec2::new(10.0, 0.0), 0.0);
    spring.step(Vec2::new(10.0, 0.0), -1.0);
    spring.step(Vec2::new(10.0, 0.0), f32::NAN);
    assert_eq!(spring.position, Vec2::ZERO);
}

#[test]
fn entering_a_link_plays_one_ripple() {
    let mut effect = make_effect(21);
    assert_eq!(effect.layers().ripple, None);
    effect.pointer_moved(Vec2::new(40.0, 30.0), true);
    let start = effect.layers().ripple.expect("ripple on hover enter");
    assert_eq!(start.radius, 0.0);
    assert!((start.opacity - RIPPLE_START_OPACITY).abs() < 1e-6);
    assert_eq!(start.center, Vec2::new(40.0, 30.0));

    drive(&mut SyntheticTicks::at_60hz(18), &mut effect);
    let mid = effect.layers().ripple.expect("still expanding at 0.3s");
    assert!(mid.radius > 0.0 && mid.radius < RIPPLE_RADIUS * RIPPLE_MAX_SCALE);
    assert!(mid.opacity > 0.0 && mid.opacity < RIPPLE_START_OPACITY);

    // staying on the link does not restart it
    effect.pointer_moved(Vec2::new(42.0, 30.0), true);
    drive(&mut SyntheticTicks::at_60hz(20), &mut effect);
    assert_eq!(effect.layers().ripple, None);

    // leaving and re-entering does
    effect.pointer_moved(Vec2::new(90.0, 30.0), false);
    assert_eq!(effect.layers().ripple, None);
    effect.pointer_moved(Vec2::new(42.0, 30.0), true);
    assert!(effect.layers().ripple.is_some());
}

#[test]
fn ripple_grows_to_twice_its_size_then_ends() {
    use std::time::Duration;
    let late = Ripple::at(Vec2::ZERO, Duration::from_millis(590)).expect("not finished");
    assert!(late.radius > RIPPLE_RADIUS * 1.9);
    assert!(late.opacity < 0.01);
    assert_eq!(Ripple::at(Vec2::ZERO, Duration::from_millis(600)), None);
}

#[test]
fn inner_glow_widens_on_hover() {
    let mut effect = make_effect(2);
    effect.pointer_moved(Vec2::new(5.0, 5.0), false);
    assert_eq!(effect.layers().inner_glow_diameter, INNER_GLOW_DIAMETER_IDLE);
    effect.pointer_moved(Vec2::new(5.0, 5.0), true);
    drive(&mut SyntheticTicks::at_60hz(6), &mut effect);
    let mid = effect.layers().inner_glow_diameter;
    assert!(mid > INNER_GLOW_DIAMETER_IDLE && mid < INNER_GLOW_DIAMETER_HOVER);
    drive(&mut SyntheticTicks::at_60hz(30), &mut effect);
    assert!((effect.layers().inner_glow_diameter - INNER_GLOW_DIAMETER_HOVER).abs() < 1e-3);
    effect.pointer_moved(Vec2::new(5.0, 5.0), false);
    drive(&mut SyntheticTicks::at_60hz(30), &mut effect);
    assert!((effect.layers().inner_glow_diameter - INNER_GLOW_DIAMETER_IDLE).abs() < 1e-3);
}
