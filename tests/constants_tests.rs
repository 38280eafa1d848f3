// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so the constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn canvas_sits_fixed_behind_content() {
    assert!(CANVAS_STYLE.contains("position:fixed"));
    assert!(CANVAS_STYLE.contains("z-index:-1"));
}

#[test]
fn settings_prefix_maps_to_known_keys() {
    assert!(SETTINGS_ATTR_PREFIX.ends_with('-'));
    for key in scrollgl_core::SETTING_KEYS {
        let attr = format!("{SETTINGS_ATTR_PREFIX}{key}");
        assert!(attr.starts_with("data-"), "{attr}");
        assert!(!attr.contains('_'), "{attr}");
    }
}

#[test]
fn pane_ranges_contain_defaults() {
    let checks = [
        (PANE_TIME_STEP, scrollgl_core::TIME_STEP),
        (PANE_SPEED_SMOOTHING, scrollgl_core::SPEED_SMOOTHING),
        (PANE_HOVER_EASE, scrollgl_core::HOVER_EASE),
    ];
    for ((key, min, max), default) in checks {
        assert!(min < max, "{key}");
        assert!((min..=max).contains(&(default as f64)), "{key}");
    }
}

#[test]
fn pane_limits_are_accepted_as_live_tunables() {
    let picks: [fn((&str, f64, f64)) -> f64; 2] = [|(_, min, _)| min, |(_, _, max)| max];
    for pick in picks {
        let t = scrollgl_core::Tunables {
            time_step: pick(PANE_TIME_STEP) as f32,
            speed_smoothing: pick(PANE_SPEED_SMOOTHING) as f32,
            hover_ease: pick(PANE_HOVER_EASE) as f32,
        };
        let mut s = scrollgl_core::Settings::default();
        s.set_tunables(t);
        assert_eq!(s.tunables(), t);
    }
}

#[test]
fn image_wait_ends_on_load_or_error() {
    assert_eq!(IMAGE_SETTLE_EVENTS, ["load", "error"]);
}

#[test]
fn placeholder_is_opaque() {
    assert_eq!(PLACEHOLDER_PIXEL[3], 255);
}
