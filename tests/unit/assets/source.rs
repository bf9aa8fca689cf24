use super::*;

fn solid(v: u8) -> Raster {
    Raster::filled(2, 2, [v, v, v, 255]).unwrap()
}

#[test]
fn stills_ignore_time() {
    let src = InMemorySource::new().with_still("logo", solid(9));
    assert_eq!(src.get_frame("logo", 0.0).unwrap(), solid(9));
    assert_eq!(src.get_frame("logo", 123.4).unwrap(), solid(9));
    assert_eq!(src.probe("logo").unwrap().fps, None);
}

#[test]
fn sequences_pick_floor_and_hold_last() {
    let mut src = InMemorySource::new();
    src.insert_sequence("clip", 10.0, vec![solid(0), solid(1), solid(2)])
        .unwrap();
    assert_eq!(src.get_frame("clip", 0.0).unwrap(), solid(0));
    assert_eq!(src.get_frame("clip", 0.19).unwrap(), solid(1));
    assert_eq!(src.get_frame("clip", 5.0).unwrap(), solid(2));
    let info = src.probe("clip").unwrap();
    assert_eq!(info.fps, Some(10.0));
    assert_eq!((info.width, info.height), (2, 2));
}

#[test]
fn unknown_media_is_a_media_error() {
    let src = InMemorySource::new();
    assert!(matches!(
        src.get_frame("nope", 0.0),
        Err(ReelError::Media(_))
    ));
}

#[test]
fn invalid_sequences_are_rejected() {
    let mut src = InMemorySource::new();
    assert!(src.insert_sequence("a", 0.0, vec![solid(0)]).is_err());
    assert!(src.insert_sequence("a", 24.0, Vec::new()).is_err());
}
