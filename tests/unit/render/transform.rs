use super::*;

use crate::{animation::ease::Interpolation, foundation::core::Point};

fn clip() -> Clip {
    Clip::new("c", "shot.mp4", 30, 60, 0)
}

#[test]
fn static_values_are_used_when_not_animated() {
    let mut c = clip();
    c.transform.position_x = 12.0;
    c.transform.rotation = 45.0;
    let t = resolve_transform(&c, 0);
    assert_eq!(t.position_x, 12.0);
    assert_eq!(t.rotation, 45.0);
    assert_eq!(t.scale_x, 100.0);
}

#[test]
fn animation_overrides_static_values() {
    let mut c = clip();
    c.transform.position_x = 500.0;
    c.animation
        .add_keyframe("position_x", 0, 0.0, Interpolation::Linear);
    c.animation
        .add_keyframe("position_x", 30, 50.0, Interpolation::Linear);
    assert_eq!(resolve_transform(&c, 15).position_x, 25.0);
    assert_eq!(resolve_transform(&c, 90).position_x, 50.0);
}

#[test]
fn low_opacity_is_forced_opaque() {
    let mut c = clip();
    c.transform.opacity = 49.9;
    assert_eq!(resolve_transform(&c, 0).opacity, 100.0);
    c.transform.opacity = 50.0;
    assert_eq!(resolve_transform(&c, 0).opacity, 50.0);
    c.animation
        .add_keyframe("opacity", 0, 10.0, Interpolation::Hold);
    assert_eq!(resolve_transform(&c, 0).opacity, 100.0);
}

#[test]
fn non_scalar_animation_is_ignored() {
    let mut c = clip();
    c.animation
        .add_keyframe("rotation", 0, "spin", Interpolation::Linear);
    assert_eq!(resolve_transform(&c, 0).rotation, 0.0);
}

#[test]
fn default_affine_is_identity() {
    let canvas = Canvas::new(8, 6).unwrap();
    let a = Transform::default().affine(canvas);
    assert!(is_identity(a));
}

#[test]
fn affine_rotates_then_scales_about_centre_then_translates() {
    let canvas = Canvas::new(100, 100).unwrap();
    let t = Transform {
        position_x: 10.0,
        position_y: 0.0,
        scale_x: 200.0,
        scale_y: 200.0,
        rotation: 90.0,
        opacity: 100.0,
    };
    // A point right of centre rotates up (counter-clockwise on screen), doubles its distance,
    // then shifts right.
    let p = t.affine(canvas) * Point::new(60.0, 50.0);
    assert!((p.x - 60.0).abs() < 1e-9, "{p:?}");
    assert!((p.y - 30.0).abs() < 1e-9, "{p:?}");
}

#[test]
fn integer_translation_moves_pixels_exactly() {
    let mut src = Raster::new(6, 4).unwrap();
    src.set_pixel(1, 1, [10, 20, 30, 255]);
    let out = warp(&src, Affine::translate(Vec2::new(2.0, 1.0)), 6, 4).unwrap();
    assert_eq!(out.pixel(3, 2), [10, 20, 30, 255]);
    assert_eq!(out.pixel(1, 1), [0, 0, 0, 0]);
}

#[test]
fn shrinking_leaves_transparent_padding() {
    let src = Raster::filled(10, 10, [200, 0, 0, 255]).unwrap();
    let t = Transform {
        scale_x: 50.0,
        scale_y: 50.0,
        ..Default::default()
    };
    let canvas = src.canvas();
    let out = warp(&src, t.affine(canvas), 10, 10).unwrap();
    assert_eq!(out.pixel(0, 0)[3], 0);
    assert_eq!(out.pixel(5, 5), [200, 0, 0, 255]);
}

#[test]
fn rotation_keeps_the_centre_and_opacity() {
    let src = Raster::filled(9, 9, [0, 90, 200, 255]).unwrap();
    let t = Transform {
        rotation: 45.0,
        ..Default::default()
    };
    let out = warp(&src, t.affine(src.canvas()), 9, 9).unwrap();
    assert_eq!(out.pixel(4, 4), [0, 90, 200, 255]);
    // Corners rotate out of the frame.
    assert_eq!(out.pixel(0, 0)[3], 0);
}

#[test]
fn translucent_pixels_keep_their_color() {
    let src = Raster::filled(6, 6, [240, 20, 20, 128]).unwrap();
    let out = warp(&src, Affine::translate(Vec2::new(1.0, 0.0)), 6, 6).unwrap();
    assert_eq!(out.pixel(0, 2)[3], 0);
    let [r, g, b, a] = out.pixel(3, 2);
    assert_eq!(a, 128);
    assert!(r.abs_diff(240) <= 2 && g.abs_diff(20) <= 2 && b.abs_diff(20) <= 2);
}

#[test]
fn degenerate_scale_yields_transparent_layer() {
    let src = Raster::filled(4, 4, [1, 2, 3, 255]).unwrap();
    let out = warp(&src, Affine::scale(0.0), 4, 4).unwrap();
    assert!(out.data.iter().all(|&b| b == 0));
}
