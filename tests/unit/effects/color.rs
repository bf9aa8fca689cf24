use super::*;

fn px(rgba: [u8; 4]) -> Raster {
    Raster::filled(2, 2, rgba).unwrap()
}

#[test]
fn defaults_are_identity() {
    let src = px([12, 200, 99, 180]);
    assert!(ColorCorrection::default().is_identity());
    assert_eq!(apply(&src, &ColorCorrection::default()).unwrap(), src);
}

#[test]
fn brightness_is_additive_and_clamped() {
    let p = ColorCorrection {
        brightness: 20.0,
        ..Default::default()
    };
    let out = apply(&px([100, 250, 0, 77]), &p).unwrap();
    assert_eq!(out.pixel(0, 0), [151, 255, 51, 77]);
}

#[test]
fn contrast_pivots_on_mid_gray() {
    let p = ColorCorrection {
        contrast: 50.0,
        ..Default::default()
    };
    let out = apply(&px([128, 200, 60, 255]), &p).unwrap();
    let [r, g, b, _] = out.pixel(0, 0);
    assert_eq!(r, 128);
    assert!(g > 200);
    assert!(b < 60);
}

#[test]
fn gamma_brightens_midtones() {
    let p = ColorCorrection {
        gamma: 2.0,
        ..Default::default()
    };
    let out = apply(&px([64, 0, 255, 255]), &p).unwrap();
    let [r, g, b, _] = out.pixel(0, 0);
    assert_eq!(r, 128);
    assert_eq!(g, 0);
    assert_eq!(b, 255);
}

#[test]
fn non_positive_gamma_is_rejected() {
    let p = ColorCorrection {
        gamma: 0.0,
        ..Default::default()
    };
    assert!(apply(&px([1, 2, 3, 4]), &p).is_err());
}

#[test]
fn full_desaturation_yields_gray() {
    let p = ColorCorrection {
        saturation: -100.0,
        ..Default::default()
    };
    let [r, g, b, _] = apply(&px([200, 40, 90, 255]), &p).unwrap().pixel(0, 0);
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn hue_shift_wraps_the_wheel() {
    // Red shifted by 60 (120 degrees) becomes green.
    let p = ColorCorrection {
        hue: 60.0,
        ..Default::default()
    };
    assert_eq!(
        apply(&px([255, 0, 0, 255]), &p).unwrap().pixel(0, 0),
        [0, 255, 0, 255]
    );
    let p = ColorCorrection {
        hue: -120.0,
        ..Default::default()
    };
    assert_eq!(
        apply(&px([255, 0, 0, 255]), &p).unwrap().pixel(0, 0),
        [0, 255, 0, 255]
    );
}

#[test]
fn temperature_warms_and_cools() {
    let warm = ColorCorrection {
        temperature: 100.0,
        ..Default::default()
    };
    assert_eq!(
        apply(&px([100, 100, 100, 255]), &warm).unwrap().pixel(0, 0),
        [130, 100, 90, 255]
    );
    let cool = ColorCorrection {
        temperature: -100.0,
        ..Default::default()
    };
    assert_eq!(
        apply(&px([100, 100, 100, 255]), &cool).unwrap().pixel(0, 0),
        [110, 100, 70, 255]
    );
}

#[test]
fn hsv_roundtrip_primaries() {
    for rgb in [[255.0, 0.0, 0.0], [0.0, 255.0, 0.0], [0.0, 0.0, 255.0], [40.0, 80.0, 120.0]] {
        let (h, s, v) = rgb_to_hsv(rgb);
        let back = hsv_to_rgb(h, s, v);
        for c in 0..3 {
            assert!((back[c] - rgb[c]).abs() < 0.01, "{rgb:?} -> {back:?}");
        }
    }
}
