// Host-side tests for the compositor: layout, scroll, loop and teardown.

mod common;

use common::{approx, compositor, FakeMedia};
use glam::Vec2;
use scrollgl_core::*;

fn sample() -> FakeMedia {
    FakeMedia::new(Rect::new(100.0, 50.0, 200.0, 100.0), Some((400.0, 200.0)))
}

#[test]
fn reference_layout_maps_dom_rect_to_world() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);

    let cam = c.camera();
    assert!(approx(cam.fov_degrees, 90.0));
    assert!(approx(cam.aspect, 800.0 / 600.0));
    assert_eq!(cam.eye(), glam::Vec3::new(0.0, 0.0, 300.0));

    let p = &c.planes()[0];
    assert_eq!(p.world_position(), Vec2::new(-200.0, 200.0));
    assert_eq!(p.size(), Vec2::new(200.0, 100.0));
    assert_eq!(p.cover_scale(), Vec2::new(1.0, 1.0));

    let b = c.backend();
    assert_eq!(b.surfaces, vec![SurfaceSize { width: 800, height: 600 }]);
    assert_eq!(b.background.map(|u| u.resolution), Some(Vec2::new(800.0, 600.0)));
}

#[test]
fn nothing_is_laid_out_before_first_resize() {
    let mut c = compositor(&[sample()]);
    assert!(c.viewport().is_none());
    c.run();
    assert!(c.tick(TickTrigger::Scheduled));
    assert_eq!(c.planes()[0].world_position(), Vec2::ZERO);
    assert_eq!(c.backend().geometry_writes, 0);
}

#[test]
fn resize_with_same_inputs_is_idempotent() {
    let mut c = compositor(&[sample(), FakeMedia::new(Rect::new(5.0, 900.0, 60.0, 90.0), None)]);
    c.resize(1280.0, 720.0, 1.5);
    let cam = *c.camera();
    let snapshot: Vec<_> = c
        .planes()
        .iter()
        .map(|p| (p.world_position(), p.size(), p.cover_scale(), p.positions().to_vec()))
        .collect();

    c.resize(1280.0, 720.0, 1.5);
    assert_eq!(*c.camera(), cam);
    let again: Vec<_> = c
        .planes()
        .iter()
        .map(|p| (p.world_position(), p.size(), p.cover_scale(), p.positions().to_vec()))
        .collect();
    assert_eq!(snapshot, again);
    let s = &c.backend().surfaces;
    assert_eq!(s[0], s[1]);
    assert_eq!(s[0], SurfaceSize { width: 1920, height: 1080 });
}

#[test]
fn empty_viewport_is_skipped() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);
    c.resize(0.0, 600.0, 1.0);
    assert_eq!(c.viewport().map(|v| v.width), Some(800.0));
    assert_eq!(c.backend().surfaces.len(), 1);
}

#[test]
fn scroll_event_renders_immediately_and_replaces_pending_frame() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    assert_eq!(c.scheduler().scheduled, 1);

    assert!(c.on_scroll(ScrollEvent { speed: 6.0, y: 40.0 }));
    assert_eq!(c.backend().renders, 1);
    assert_eq!(c.scheduler().cancelled, 1);
    assert_eq!(c.scheduler().scheduled, 2);
    assert!(approx(c.scroll_state().speed, 2.0));
    assert_eq!(c.planes()[0].world_position(), Vec2::new(-200.0, 160.0));
    assert_eq!(c.backend().background.map(|u| u.scroll_speed), Some(c.scroll_state().speed));
}

#[test]
fn scroll_while_idle_updates_state_without_rendering() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);
    assert!(!c.on_scroll(ScrollEvent { speed: 6.0, y: 40.0 }));
    assert_eq!(c.backend().renders, 0);
    assert_eq!(c.scroll_state().offset_y, 40.0);
    assert_eq!(c.scroll_state().speed_target, 6.0);
}

#[test]
fn each_tick_advances_time_and_writes_uniforms() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    for _ in 0..3 {
        assert!(c.tick(TickTrigger::Scheduled));
    }
    assert!((c.time() - 3.0 * TIME_STEP).abs() < 1e-6);
    assert_eq!(c.backend().renders, 3);
    let h = c.planes()[0].handle();
    assert!((c.backend().plane_uniforms[&h].time - c.time()).abs() < 1e-6);
}

#[test]
fn tunables_change_the_live_loop() {
    let mut c = compositor(&[sample()]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    c.set_tunables(Tunables {
        time_step: 0.5,
        speed_smoothing: 1.0,
        hover_ease: 0.5,
    });
    c.on_scroll(ScrollEvent { speed: 9.0, y: 0.0 });
    assert!(approx(c.time(), 0.5));
    assert!(approx(c.scroll_state().speed, 9.0));
}

#[test]
fn nothing_renders_after_destroy() {
    let mut c = compositor(&[sample(), sample()]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    c.tick(TickTrigger::Scheduled);
    let renders = c.backend().renders;
    let writes = c.backend().uniform_writes;

    c.destroy();
    assert!(c.is_destroyed());
    assert!(c.backend().released);
    assert_eq!(c.backend().removed, vec![PlaneHandle(0), PlaneHandle(1)]);
    assert!(c.planes().is_empty());

    assert!(!c.on_scroll(ScrollEvent { speed: 3.0, y: 10.0 }));
    assert!(!c.tick(TickTrigger::External));
    assert!(!c.tick(TickTrigger::Scheduled));
    c.resize(1024.0, 768.0, 1.0);
    assert_eq!(c.phase(), LoopPhase::Stopped);
    assert_eq!(c.backend().renders, renders);
    assert_eq!(c.backend().uniform_writes, writes);
    assert_eq!(c.backend().surfaces.len(), 1);
    assert!(!c.run());
}

#[test]
fn destroy_is_idempotent() {
    let mut c = compositor(&[sample()]);
    c.destroy();
    c.destroy();
    assert_eq!(c.backend().removed.len(), 1);
    assert_eq!(c.phase(), LoopPhase::Stopped);
}
