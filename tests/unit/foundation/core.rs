use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(20, 10).unwrap();
    assert_eq!(c.center(), Point::new(10.0, 5.0));
}

#[test]
fn filled_raster_repeats_pixel() {
    let r = Raster::filled(3, 2, [1, 2, 3, 4]).unwrap();
    assert_eq!(r.data.len(), 3 * 2 * 4);
    assert_eq!(r.pixel(2, 1), [1, 2, 3, 4]);
}

#[test]
fn from_rgba8_validates_length() {
    assert!(Raster::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn set_pixel_roundtrips() {
    let mut r = Raster::new(4, 4).unwrap();
    r.set_pixel(3, 2, [9, 8, 7, 6]);
    assert_eq!(r.pixel(3, 2), [9, 8, 7, 6]);
    assert_eq!(r.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn fit_within_preserves_aspect() {
    let r = Raster::filled(200, 100, [255, 0, 0, 255]).unwrap();
    let fitted = r.fit_within(Canvas::new(100, 100).unwrap()).unwrap();
    assert_eq!((fitted.width, fitted.height), (100, 50));
}

#[test]
fn resized_constant_image_stays_constant() {
    let r = Raster::filled(8, 8, [40, 80, 120, 255]).unwrap();
    let out = r.resized(4, 2).unwrap();
    assert_eq!((out.width, out.height), (4, 2));
    for px in out.data.chunks_exact(4) {
        assert!((i32::from(px[0]) - 40).abs() <= 1);
        assert!((i32::from(px[2]) - 120).abs() <= 1);
    }
}

#[test]
fn pixmap_conversion_keeps_opaque_and_clear_pixels() {
    let mut r = Raster::new(3, 1).unwrap();
    r.set_pixel(0, 0, [12, 200, 7, 255]);
    r.set_pixel(2, 0, [255, 255, 255, 128]);
    let pixmap = r.to_pixmap().unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (3, 1));
    // Stored premultiplied.
    assert_eq!(pixmap.pixels()[2].red(), 128);

    let back = Raster::from_pixmap(&pixmap).unwrap();
    assert_eq!(back.pixel(0, 0), [12, 200, 7, 255]);
    assert_eq!(back.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(back.pixel(2, 0), [255, 255, 255, 128]);
}
