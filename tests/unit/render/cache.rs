use super::*;

use crate::{
    animation::ease::Interpolation,
    effects::model::EffectKind,
    foundation::core::Raster,
    render::layer::Placement,
};

fn content(v: u8) -> Arc<LayerContent> {
    Arc::new(LayerContent {
        raster: Raster::filled(1, 1, [v, v, v, 255]).unwrap(),
        placement: Placement::FullFrame,
    })
}

fn key(frame: u64) -> LayerKey {
    LayerKey {
        media: "m.mp4".into(),
        relative_frame: frame,
        track: 0,
        fingerprint: 1,
    }
}

#[test]
fn evicts_oldest_insertion_even_after_reads() {
    let cache = LayerCache::new(2);
    cache.insert(key(0), content(0));
    cache.insert(key(1), content(1));
    assert!(cache.get(&key(0)).is_some());
    cache.insert(key(2), content(2));
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key(0)).is_none());
    assert!(cache.get(&key(1)).is_some());
    assert!(cache.get(&key(2)).is_some());
}

#[test]
fn zero_capacity_disables_caching() {
    let cache = LayerCache::new(0);
    cache.insert(key(0), content(0));
    assert!(cache.is_empty());
    assert!(cache.get(&key(0)).is_none());
    assert_eq!(cache.capacity(), 0);
}

#[test]
fn clear_empties_the_cache() {
    let cache = LayerCache::new(DEFAULT_CACHE_CAPACITY);
    cache.insert(key(0), content(0));
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 50);
}

#[test]
fn fingerprint_tracks_render_settings() {
    let mut clip = Clip::new("a", "m.mp4", 10, 20, 1);
    let base = LayerKey::for_clip(&clip, 3).unwrap();
    assert_eq!(base, LayerKey::for_clip(&clip, 3).unwrap());

    clip.start_frame = 99;
    clip.transform.position_x = 40.0;
    assert_eq!(base, LayerKey::for_clip(&clip, 3).unwrap());

    clip.effects
        .push(crate::effects::model::Effect::new(EffectKind::Vignette));
    let with_fx = LayerKey::for_clip(&clip, 3).unwrap();
    assert_ne!(base.fingerprint, with_fx.fingerprint);

    clip.animation
        .add_keyframe("brightness", 0, 10.0, Interpolation::Linear);
    assert_ne!(
        with_fx.fingerprint,
        LayerKey::for_clip(&clip, 3).unwrap().fingerprint
    );
}
