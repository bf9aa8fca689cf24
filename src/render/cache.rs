use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

use lru::LruCache;

use crate::{
    animation::set::AnimationSet,
    effects::model::Effect,
    foundation::error::ReelResult,
    render::layer::LayerContent,
    scene::clip::{Clip, ColorAdjust, MediaKind},
};

/// Default number of cached layers.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Identity of a rendered layer.
///
/// `fingerprint` hashes everything about the clip that changes its pixels besides the frame, so
/// editing effects, color or keyframes never serves a stale layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerKey {
    /// Media reference.
    pub media: String,
    /// Frame relative to the clip start.
    pub relative_frame: u64,
    /// Clip track.
    pub track: i32,
    /// xxh3 of the clip's render-relevant settings.
    pub fingerprint: u64,
}

#[derive(serde::Serialize)]
struct FingerprintInput<'a> {
    name: &'a str,
    kind: MediaKind,
    fps: Option<f64>,
    color: &'a ColorAdjust,
    effects: &'a [Effect],
    animation: &'a AnimationSet,
}

impl LayerKey {
    /// Key for `clip` at `relative_frame`.
    pub fn for_clip(clip: &Clip, relative_frame: u64) -> ReelResult<Self> {
        let input = FingerprintInput {
            name: &clip.name,
            kind: clip.media_kind(),
            fps: clip.fps,
            color: &clip.color,
            effects: &clip.effects,
            animation: &clip.animation,
        };
        let bytes = serde_json::to_vec(&input)?;
        Ok(Self {
            media: clip.media.clone(),
            relative_frame,
            track: clip.track,
            fingerprint: xxhash_rust::xxh3::xxh3_64(&bytes),
        })
    }
}

/// Bounded map of rendered layers, oldest insertion evicted first.
///
/// Lookups do not refresh recency. A capacity of zero disables caching.
#[derive(Debug)]
pub struct LayerCache {
    inner: Option<Mutex<LruCache<LayerKey, Arc<LayerContent>>>>,
}

impl LayerCache {
    /// Cache holding at most `capacity` layers.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|c| Mutex::new(LruCache::new(c))),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut LruCache<LayerKey, Arc<LayerContent>>) -> R) -> Option<R> {
        let inner = self.inner.as_ref()?;
        let mut guard = inner.lock().unwrap_or_else(|e| e.into_inner());
        Some(f(&mut guard))
    }

    /// Cached layer for `key`.
    pub fn get(&self, key: &LayerKey) -> Option<Arc<LayerContent>> {
        self.with(|c| c.peek(key).cloned()).flatten()
    }

    /// Store a layer, evicting the oldest entry when full.
    pub fn insert(&self, key: LayerKey, content: Arc<LayerContent>) {
        if let Some(Some((evicted, _))) = self.with(|c| c.push(key, content)) {
            tracing::trace!(media = %evicted.media, frame = evicted.relative_frame, "layer evicted");
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.with(|c| c.clear());
    }

    /// Number of cached layers.
    pub fn len(&self) -> usize {
        self.with(|c| c.len()).unwrap_or(0)
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.with(|c| c.cap().get()).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
