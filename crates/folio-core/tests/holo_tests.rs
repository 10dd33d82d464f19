// Host-side tests for the holographic background geometry.

use folio_core::constants::*;
use folio_core::*;

#[test]
fn same_time_and_size_give_identical_frames() {
    for t in [0.0, 16.0, 12_345.0, 1.0e7] {
        assert_eq!(compose(t, 1280.0, 720.0), compose(t, 1280.0, 720.0));
    }
}

#[test]
fn different_times_move_the_grid() {
    let a = compose(0.0, 800.0, 600.0);
    let b = compose(1600.0, 800.0, 600.0);
    assert_ne!(a.horizontal, b.horizontal);
    assert_ne!(a.glows, b.glows);
}

#[test]
fn grid_covers_the_surface_plus_one_spacing() {
    let frame = compose(0.0, 800.0, 600.0);
    // 0, 80, ..., 640 for height 600 (< 680)
    assert_eq!(frame.horizontal.len(), 9);
    // 0, 80, ..., 800 for width 800 (< 880)
    assert_eq!(frame.vertical.len(), 11);
}

#[test]
fn grid_offsets_stay_within_a_quarter_spacing() {
    let amplitude = HOLO_GRID_SPACING / 4.0;
    for t in [0.0, 500.0, 3_000.0, 99_999.0] {
        let frame = compose(t, 1024.0, 768.0);
        for (i, y) in frame.horizontal.iter().enumerate() {
            let base = i as f64 * HOLO_GRID_SPACING;
            assert!((y - base).abs() <= amplitude + 1e-9, "line {i} at t={t}");
        }
    }
}

#[test]
fn grid_offset_matches_sine_wave() {
    let t = 4_000.0;
    let frame = compose(t, 400.0, 400.0);
    let y = 160.0;
    let expected = y + (t / 2000.0 + y / 200.0).sin() * HOLO_GRID_SPACING / 4.0;
    assert!((frame.horizontal[2] - expected).abs() < 1e-9);
}

#[test]
fn glows_stay_on_the_surface() {
    for t in [0.0, 777.0, 50_000.0] {
        let frame = compose(t, 640.0, 480.0);
        assert_eq!(frame.glows.len(), HOLO_GLOW_COUNT);
        for g in &frame.glows {
            assert!(g.x >= 0.0 && g.x <= 640.0);
            assert!(g.y >= 0.0 && g.y <= 480.0);
            assert!(g.radius >= 1.0 && g.radius <= 5.0);
        }
    }
}

#[test]
fn backdrop_is_centred() {
    let frame = compose(0.0, 1000.0, 500.0);
    assert_eq!(frame.backdrop.cx, 500.0);
    assert_eq!(frame.backdrop.cy, 250.0);
    assert_eq!(frame.backdrop.inner_radius, 0.0);
    assert_eq!(frame.backdrop.outer_radius, 800.0);
}

#[test]
fn clock_advances_sixteen_units_per_frame() {
    let mut bg = HoloBackground::new(320.0, 240.0);
    assert_eq!(bg.time(), 0.0);
    drive(&mut SyntheticTicks::at_60hz(10), &mut bg);
    assert_eq!(bg.time(), 160.0);
    // last drawn frame used the time before the final step
    assert_eq!(bg.frame(), Some(&compose(144.0, 320.0, 240.0)));
}

#[test]
fn resize_applies_to_the_next_frame() {
    let mut bg = HoloBackground::new(320.0, 240.0);
    drive(&mut SyntheticTicks::at_60hz(1), &mut bg);
    bg.resize(640.0, 480.0);
    drive(&mut SyntheticTicks::at_60hz(1), &mut bg);
    let frame = bg.frame().expect("frame composed");
    assert_eq!(frame.width, 640.0);
    assert_eq!(frame.height, 480.0);
}

#[test]
fn colours_render_as_css() {
    assert_eq!(GRID_CENTER.css(), "rgba(217, 70, 239, 0.15)");
    assert_eq!(GRID_EDGE.css(), "rgba(168, 85, 247, 0.075)");
}
