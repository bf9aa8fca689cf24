use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn over_onto_transparent_keeps_straight_color() {
    assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200], 1.0), [100, 110, 120, 200]);
}

#[test]
fn half_opacity_onto_opaque_averages() {
    let out = over([0, 0, 0, 255], [200, 100, 0, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((99..=101).contains(&out[0]));
    assert!((49..=51).contains(&out[1]));
}

#[test]
fn multiply_layer_darkens() {
    let out = blend_over([128, 128, 128, 255], [128, 255, 0, 255], BlendMode::Multiply, 1.0);
    assert_eq!(out, [64, 128, 0, 255]);
}

#[test]
fn full_frame_size_mismatch_is_an_error() {
    let mut dst = Raster::new(4, 4).unwrap();
    let src = Raster::new(2, 4).unwrap();
    assert!(blend_over_in_place(&mut dst, &src, BlendMode::Normal, 1.0).is_err());
}

#[test]
fn centered_origin_offsets_and_clamps() {
    let dst = Raster::new(100, 50).unwrap();
    assert_eq!(centered_origin(&dst, 60, 50, (0.0, 0.0)), (20, 0));
    assert_eq!(centered_origin(&dst, 60, 50, (7.9, 3.0)), (27, 0));
    assert_eq!(centered_origin(&dst, 60, 50, (500.0, 0.0)), (40, 0));
    assert_eq!(centered_origin(&dst, 60, 50, (-500.0, 0.0)), (0, 0));
}

#[test]
fn overlay_is_clipped_to_the_frame() {
    let mut dst = Raster::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let src = Raster::filled(3, 3, [255, 255, 255, 255]).unwrap();
    overlay_at(&mut dst, &src, (2, 2), BlendMode::Normal, 1.0);
    assert_eq!(dst.pixel(3, 3), [255, 255, 255, 255]);
    assert_eq!(dst.pixel(1, 1), [0, 0, 0, 255]);
}
