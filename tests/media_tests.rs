// Host-side tests for media plane layout, cover scale and hover.

mod common;

use common::{approx, compositor, FakeMedia};
use glam::Vec2;
use scrollgl_core::*;

#[test]
fn world_center_flips_y_and_subtracts_scroll() {
    let r = Rect::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(world_center(&r, 800.0, 600.0, 0.0), Vec2::new(-200.0, 200.0));
    assert_eq!(world_center(&r, 800.0, 600.0, 120.0), Vec2::new(-200.0, 80.0));
    // A rect covering the whole viewport sits at the origin.
    let full = Rect::new(0.0, 0.0, 800.0, 600.0);
    assert_eq!(world_center(&full, 800.0, 600.0, 0.0), Vec2::ZERO);
}

#[test]
fn world_position_matches_formula_for_various_rects() {
    let rects = [
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(-40.0, 700.0, 320.0, 180.0),
        Rect::new(512.5, 33.25, 64.0, 48.0),
    ];
    for r in rects {
        let media = FakeMedia::new(r, Some((640.0, 480.0)));
        let mut c = compositor(&[media]);
        c.resize(1024.0, 768.0, 1.0);
        let p = &c.planes()[0];
        let expected_x = -1024.0 / 2.0 + r.left + r.width / 2.0;
        let expected_y = 768.0 / 2.0 - r.top - r.height / 2.0;
        assert!(approx(p.world_position().x, expected_x), "{r:?}");
        assert!(approx(p.world_position().y, expected_y), "{r:?}");
        assert_eq!(p.size(), Vec2::new(r.width, r.height));
        assert_eq!(p.world_rect().center, p.world_position());
    }
}

#[test]
fn plane_template_is_tessellated_unit_square() {
    let g = PlaneGeometry::new(PLANE_SEGMENTS);
    assert_eq!(g.vertex_count(), 121);
    assert_eq!(g.indices().len(), 600);
    assert_eq!(g.template()[0], [-0.5, 0.5, 0.0]);
    assert_eq!(g.template()[120], [0.5, -0.5, 0.0]);
    assert_eq!(g.uvs()[0], [0.0, 0.0]);
    assert_eq!(g.uvs()[120], [1.0, 1.0]);
    assert!(g.indices().iter().all(|&i| (i as usize) < g.vertex_count()));
    // Out-of-range segment counts are clamped.
    assert_eq!(PlaneGeometry::new(0).segments(), 1);
}

#[test]
fn plane_geometry_is_template_times_size_and_template_is_untouched() {
    let a = FakeMedia::new(Rect::new(0.0, 0.0, 200.0, 100.0), Some((2.0, 1.0)));
    let b = FakeMedia::new(Rect::new(0.0, 300.0, 50.0, 400.0), Some((1.0, 8.0)));
    let mut c = compositor(&[a.clone(), b]);
    let pristine = PlaneGeometry::new(PLANE_SEGMENTS).template().to_vec();

    c.resize(800.0, 600.0, 1.0);
    a.set_rect(Rect::new(10.0, 10.0, 300.0, 150.0));
    c.resize(800.0, 600.0, 1.0);

    for plane in c.planes() {
        let size = plane.size();
        assert_eq!(plane.positions().len(), pristine.len());
        for (p, t) in plane.positions().iter().zip(&pristine) {
            assert_eq!(*p, [t[0] * size.x, t[1] * size.y, t[2]]);
        }
        assert_eq!(c.backend().geometry[&plane.handle()], plane.positions());
    }
    assert_eq!(c.planes()[0].size(), Vec2::new(300.0, 150.0));
    // Repeated resizes must not compound.
    assert_eq!(c.planes()[0].positions()[0], [-150.0, 75.0, 0.0]);
}

#[test]
fn cover_scale_follows_natural_and_rendered_aspects() {
    // Container 2:1, image 1:1 -> crop vertically.
    let m = FakeMedia::new(Rect::new(0.0, 0.0, 200.0, 100.0), Some((400.0, 400.0)));
    let mut c = compositor(&[m]);
    c.resize(800.0, 600.0, 1.0);
    assert_eq!(c.planes()[0].cover_scale(), Vec2::new(1.0, 0.5));
}

#[test]
fn zero_rendered_size_keeps_previous_cover_scale() {
    let m = FakeMedia::new(Rect::new(0.0, 0.0, 200.0, 100.0), Some((400.0, 400.0)));
    let mut c = compositor(&[m.clone()]);
    c.resize(800.0, 600.0, 1.0);
    let before = c.planes()[0].cover_scale();

    m.set_rect(Rect::new(20.0, 40.0, 120.0, 60.0));
    m.set_rendered(0.0, 0.0);
    c.resize(800.0, 600.0, 1.0);

    let p = &c.planes()[0];
    assert_eq!(p.cover_scale(), before);
    // Everything else still follows the rect.
    assert_eq!(p.size(), Vec2::new(120.0, 60.0));
    assert_eq!(p.world_position(), Vec2::new(-400.0 + 20.0 + 60.0, 300.0 - 40.0 - 30.0));
}

#[test]
fn zero_size_rect_keeps_last_good_layout() {
    let m = FakeMedia::new(Rect::new(100.0, 50.0, 200.0, 100.0), Some((400.0, 400.0)));
    let other = FakeMedia::new(Rect::new(0.0, 300.0, 80.0, 40.0), None);
    let mut c = compositor(&[m.clone(), other]);
    c.resize(800.0, 600.0, 1.0);
    let p = &c.planes()[0];
    let (pos, size, scale, rect) = (p.world_position(), p.size(), p.cover_scale(), p.rect());
    let positions = p.positions().to_vec();
    let writes = c.backend().geometry_writes;

    m.set_rect(Rect::new(0.0, 0.0, 0.0, 0.0));
    c.resize(800.0, 600.0, 1.0);

    let p = &c.planes()[0];
    assert_eq!(p.world_position(), Vec2::new(-200.0, 200.0));
    assert_eq!(p.world_position(), pos);
    assert_eq!(p.size(), size);
    assert_eq!(p.cover_scale(), scale);
    assert_eq!(p.rect(), rect);
    assert_eq!(p.positions(), positions.as_slice());
    assert_eq!(p.positions()[0], [-100.0, 50.0, 0.0]);
    assert_eq!(c.backend().geometry[&p.handle()], positions);
    // Only the other plane pushed new geometry.
    assert_eq!(c.backend().geometry_writes, writes + 1);

    // Layout resumes once the element has a size again.
    m.set_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    c.resize(800.0, 600.0, 1.0);
    assert_eq!(c.planes()[0].size(), Vec2::new(100.0, 100.0));
    assert_eq!(c.planes()[0].cover_scale(), Vec2::new(1.0, 1.0));
}

#[test]
fn missing_natural_size_falls_back_to_neutral_scale() {
    let undecoded = FakeMedia::new(Rect::new(0.0, 0.0, 300.0, 100.0), None);
    let broken = FakeMedia::new(Rect::new(0.0, 0.0, 300.0, 100.0), Some((0.0, 0.0)));
    let mut c = compositor(&[undecoded, broken]);
    c.resize(800.0, 600.0, 1.0);
    for p in c.planes() {
        assert_eq!(p.cover_scale(), Vec2::from(NEUTRAL_COVER_SCALE));
    }
}

#[test]
fn pointer_sets_hover_target_and_uv() {
    let m = FakeMedia::new(Rect::new(100.0, 100.0, 200.0, 100.0), Some((2.0, 1.0)));
    let mut c = compositor(&[m]);
    c.resize(800.0, 600.0, 1.0);

    c.pointer_move(150.0, 125.0);
    let p = &c.planes()[0];
    assert_eq!(p.hover_target(), 1.0);
    assert!(approx(p.pointer().x, 0.25));
    assert!(approx(p.pointer().y, 0.75));

    c.pointer_move(10.0, 10.0);
    assert_eq!(c.planes()[0].hover_target(), 0.0);
}

#[test]
fn hover_progress_eases_towards_target_per_tick() {
    let m = FakeMedia::new(Rect::new(0.0, 0.0, 100.0, 100.0), Some((1.0, 1.0)));
    let mut c = compositor(&[m]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    c.pointer_move(50.0, 50.0);

    c.tick(TickTrigger::Scheduled);
    assert!(approx(c.planes()[0].hover_progress(), HOVER_EASE));
    c.tick(TickTrigger::Scheduled);
    let expected = HOVER_EASE + (1.0 - HOVER_EASE) * HOVER_EASE;
    assert!(approx(c.planes()[0].hover_progress(), expected));
    let handle = c.planes()[0].handle();
    assert!(approx(c.backend().plane_uniforms[&handle].hover, expected));
}

#[test]
fn uniforms_carry_position_plus_scroll_offset() {
    let m = FakeMedia::new(Rect::new(100.0, 50.0, 200.0, 100.0), Some((400.0, 200.0)));
    let mut c = compositor(&[m]);
    c.resize(800.0, 600.0, 1.0);
    c.run();
    c.on_scroll(ScrollEvent { speed: 0.0, y: 100.0 });

    let p = &c.planes()[0];
    assert_eq!(p.world_position(), Vec2::new(-200.0, 100.0));
    let u = c.backend().plane_uniforms[&p.handle()];
    assert_eq!(u.position, Vec2::new(-200.0, 200.0));
    assert_eq!(u.resolution, Vec2::new(800.0, 600.0));
    assert_eq!(u.cover_scale, Vec2::new(1.0, 1.0));
}
