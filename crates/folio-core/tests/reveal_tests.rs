// Host-side tests for the scroll-reveal latch and its attribute parsing.

use folio_core::*;
use std::collections::HashMap;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_match_documented_options() {
    let cfg = RevealConfig::default();
    assert_eq!(cfg.variant, RevealVariant::FadeUp);
    assert_eq!(cfg.delay_ms, 0);
    assert_eq!(cfg.duration_ms, 700);
    assert!((cfg.threshold - 0.15).abs() < 1e-12);
    assert!(cfg.once);
}

#[test]
fn config_reads_data_attributes() {
    let cfg = RevealConfig::from_attributes(attrs(&[
        ("data-variant", "zoom-in"),
        ("data-delay", "120"),
        ("data-duration", "900"),
        ("data-threshold", "0.4"),
        ("data-once", "false"),
    ]))
    .expect("valid attributes");
    assert_eq!(cfg.variant, RevealVariant::ZoomIn);
    assert_eq!(cfg.delay_ms, 120);
    assert_eq!(cfg.duration_ms, 900);
    assert!((cfg.threshold - 0.4).abs() < 1e-12);
    assert!(!cfg.once);
    assert_eq!(
        cfg.transition_style(),
        "transition-duration: 900ms; transition-delay: 120ms"
    );
}

#[test]
fn config_rejects_bad_attributes() {
    assert_eq!(
        RevealConfig::from_attributes(attrs(&[("data-variant", "slide-left")])),
        Err(ConfigError::UnknownVariant("slide-left".into()))
    );
    assert!(matches!(
        RevealConfig::from_attributes(attrs(&[("data-threshold", "1.5")])),
        Err(ConfigError::OutOfRange { .. })
    ));
    assert!(matches!(
        RevealConfig::from_attributes(attrs(&[("data-delay", "-3")])),
        Err(ConfigError::InvalidNumber { .. })
    ));
}

#[test]
fn variants_round_trip_through_their_names() {
    for v in [
        RevealVariant::FadeUp,
        RevealVariant::FadeIn,
        RevealVariant::ZoomIn,
    ] {
        assert_eq!(v.as_str().parse::<RevealVariant>(), Ok(v));
        assert_eq!(v.class_name(), format!("reveal--{v}"));
    }
}

#[test]
fn never_visible_below_threshold() {
    let mut latch = RevealLatch::mount(RevealConfig::default(), false);
    assert!(!latch.is_visible());
    assert!(latch.observing());
    for ratio in [0.0, 0.05, 0.1, 0.149] {
        assert_eq!(latch.on_intersection(true, ratio), LatchChange::Unchanged);
        assert!(!latch.is_visible());
    }
    assert_eq!(
        latch.on_intersection(true, 0.15),
        LatchChange::Revealed { unobserve: true }
    );
    assert!(latch.is_visible());
}

#[test]
fn once_latch_stays_visible_after_leaving() {
    let mut latch = RevealLatch::mount(RevealConfig::default(), false);
    latch.on_intersection(true, 0.5);
    assert!(!latch.observing());
    assert_eq!(latch.on_intersection(false, 0.0), LatchChange::Unchanged);
    assert_eq!(latch.on_intersection(true, 1.0), LatchChange::Unchanged);
    assert!(latch.is_visible());
}

#[test]
fn repeatable_latch_toggles_with_the_viewport() {
    let cfg = RevealConfig {
        once: false,
        ..RevealConfig::default()
    };
    let mut latch = RevealLatch::mount(cfg, false);
    assert_eq!(
        latch.on_intersection(true, 0.3),
        LatchChange::Revealed { unobserve: false }
    );
    assert!(latch.observing());
    assert_eq!(latch.on_intersection(true, 0.6), LatchChange::Unchanged);
    assert_eq!(latch.on_intersection(false, 0.0), LatchChange::Hidden);
    assert!(!latch.is_visible());
    assert_eq!(latch.on_intersection(false, 0.0), LatchChange::Unchanged);
    assert_eq!(
        latch.on_intersection(true, 0.2),
        LatchChange::Revealed { unobserve: false }
    );
}

#[test]
fn reduced_motion_is_visible_without_observing() {
    let mut latch = RevealLatch::mount(RevealConfig::default(), true);
    assert!(latch.is_visible());
    assert!(!latch.observing());
    assert_eq!(latch.on_intersection(false, 0.0), LatchChange::Unchanged);
    assert!(latch.is_visible());
}

#[test]
fn class_names_track_visibility() {
    let cfg = RevealConfig {
        variant: RevealVariant::FadeIn,
        ..RevealConfig::default()
    };
    let mut latch = RevealLatch::mount(cfg, false);
    assert_eq!(latch.class_names(), vec!["reveal", "reveal--fade-in"]);
    latch.on_intersection(true, 1.0);
    assert_eq!(
        latch.class_names(),
        vec!["reveal", "reveal--fade-in", "reveal--visible"]
    );
}

#[test]
fn release_shows_anything_still_waiting() {
    let mut waiting = RevealLatch::mount(RevealConfig::default(), false);
    assert_eq!(waiting.release(), LatchChange::Revealed { unobserve: true });
    assert!(waiting.is_visible());
    assert!(!waiting.observing());
    assert!(waiting.class_names().contains(&REVEAL_VISIBLE_CLASS));
    // later callbacks cannot hide it again
    assert_eq!(waiting.on_intersection(false, 0.0), LatchChange::Unchanged);

    let mut shown = RevealLatch::mount(
        RevealConfig {
            once: false,
            ..RevealConfig::default()
        },
        false,
    );
    shown.on_intersection(true, 1.0);
    assert_eq!(shown.release(), LatchChange::Unchanged);
    assert!(shown.is_visible());
    assert_eq!(shown.on_intersection(false, 0.0), LatchChange::Unchanged);
}
