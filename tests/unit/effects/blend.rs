use super::*;

const ALL_MODES: [BlendMode; 8] = [
    BlendMode::Normal,
    BlendMode::Multiply,
    BlendMode::Screen,
    BlendMode::Overlay,
    BlendMode::SoftLight,
    BlendMode::HardLight,
    BlendMode::Add,
    BlendMode::Subtract,
];

#[test]
fn channel_formulas() {
    let close = |a: f32, b: f32| (a - b).abs() < 1e-6;
    assert!(close(blend_channel(BlendMode::Normal, 0.2, 0.7), 0.7));
    assert!(close(blend_channel(BlendMode::Multiply, 0.5, 0.5), 0.25));
    assert!(close(blend_channel(BlendMode::Screen, 0.5, 0.5), 0.75));
    assert!(close(blend_channel(BlendMode::Overlay, 0.25, 0.5), 0.25));
    assert!(close(blend_channel(BlendMode::Overlay, 0.75, 0.5), 0.75));
    assert!(close(blend_channel(BlendMode::HardLight, 0.5, 0.25), 0.25));
    assert!(close(blend_channel(BlendMode::HardLight, 0.5, 0.75), 0.75));
    assert!(close(blend_channel(BlendMode::SoftLight, 0.25, 0.5), 0.25));
    assert!(close(blend_channel(BlendMode::SoftLight, 0.25, 1.0), 0.5));
    assert!(close(blend_channel(BlendMode::Add, 0.75, 0.5), 1.0));
    assert!(close(blend_channel(BlendMode::Subtract, 0.25, 0.5), 0.0));
}

#[test]
fn channel_output_is_always_in_unit_range() {
    for mode in ALL_MODES {
        for b in [0.0f32, 0.1, 0.49, 0.5, 0.9, 1.0] {
            for o in [0.0f32, 0.3, 0.5, 0.51, 1.0] {
                let v = blend_channel(mode, b, o);
                assert!((0.0..=1.0).contains(&v), "{mode:?} {b} {o} -> {v}");
            }
        }
    }
}

#[test]
fn normal_blend_replaces() {
    let base = Raster::filled(2, 2, [10, 10, 10, 255]).unwrap();
    let over = Raster::filled(2, 2, [200, 100, 50, 128]).unwrap();
    assert_eq!(blend(&base, &over, BlendMode::Normal).unwrap(), over);
}

#[test]
fn multiply_keeps_overlay_alpha() {
    let base = Raster::filled(1, 1, [255, 128, 0, 255]).unwrap();
    let over = Raster::filled(1, 1, [128, 255, 255, 90]).unwrap();
    let out = blend(&base, &over, BlendMode::Multiply).unwrap();
    assert_eq!(out.pixel(0, 0), [128, 128, 0, 90]);
}

#[test]
fn mismatched_sizes_are_errors() {
    let a = Raster::new(2, 2).unwrap();
    let b = Raster::new(3, 2).unwrap();
    assert!(blend(&a, &b, BlendMode::Screen).is_err());
    assert!(mix(&a, &b, 0.5).is_err());
}

#[test]
fn mix_endpoints_and_midpoint() {
    let a = Raster::filled(1, 1, [0, 100, 200, 255]).unwrap();
    let b = Raster::filled(1, 1, [200, 100, 0, 55]).unwrap();
    assert_eq!(mix(&a, &b, 0.0).unwrap(), a);
    assert_eq!(mix(&a, &b, 1.0).unwrap(), b);
    let mid = mix(&a, &b, 0.5).unwrap().pixel(0, 0);
    assert!((99..=101).contains(&mid[0]));
    assert!((99..=101).contains(&mid[2]));
}
