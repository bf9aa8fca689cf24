use std::io::Cursor;

use super::*;

fn png_bytes(rgba: [u8; 4], w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_keeps_straight_alpha() {
    let r = decode_image(&png_bytes([100, 50, 200, 128], 3, 2)).unwrap();
    assert_eq!((r.width, r.height), (3, 2));
    assert_eq!(r.pixel(2, 1), [100, 50, 200, 128]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn reads_and_probes_stills_relative_to_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("still.png"), png_bytes([1, 2, 3, 255], 4, 5)).unwrap();

    let src = DiskFrameSource::with_root(dir.path());
    let frame = src.get_frame("still.png", 9.0).unwrap();
    assert_eq!(frame.pixel(0, 0), [1, 2, 3, 255]);

    let info = src.probe("still.png").unwrap();
    assert_eq!((info.width, info.height, info.fps), (4, 5, None));
}

#[test]
fn missing_file_is_a_media_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = DiskFrameSource::with_root(dir.path());
    assert!(matches!(
        src.get_frame("gone.png", 0.0),
        Err(ReelError::Media(_))
    ));
}

#[test]
fn audio_is_not_frame_decodable() {
    let src = DiskFrameSource::new();
    assert!(src.get_frame("song.mp3", 0.0).is_err());
}

#[test]
fn absolute_paths_ignore_root() {
    let src = DiskFrameSource::with_root("/srv/media");
    assert_eq!(src.resolve("/tmp/a.png"), PathBuf::from("/tmp/a.png"));
    assert_eq!(src.resolve("a.png"), PathBuf::from("/srv/media/a.png"));
}
