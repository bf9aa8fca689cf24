use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{
        ease::Interpolation,
        keyframe::{Keyframe, PropertyTrack},
        value::PropertyValue,
    },
    foundation::error::{ReelError, ReelResult},
};

/// All animated properties of one clip, keyed by property name.
///
/// Tracks are created lazily by [`AnimationSet::add_keyframe`]. Persisted as a JSON object
/// mapping property name to track; loading skips (and logs) malformed tracks instead of failing
/// the whole set.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct AnimationSet {
    tracks: BTreeMap<String, PropertyTrack>,
}

impl AnimationSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no track exists.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Add or replace a key, creating the property's track on first use.
    pub fn add_keyframe(
        &mut self,
        property: &str,
        frame: u64,
        value: impl Into<PropertyValue>,
        interpolation: Interpolation,
    ) {
        self.track_entry(property)
            .add_keyframe(frame, value, interpolation);
    }

    /// Insert a fully specified key (control points included).
    pub fn insert_keyframe(&mut self, property: &str, key: Keyframe) {
        self.track_entry(property).insert(key);
    }

    fn track_entry(&mut self, property: &str) -> &mut PropertyTrack {
        self.tracks
            .entry(property.to_string())
            .or_insert_with(|| PropertyTrack::new(property))
    }

    /// Remove the key at `frame` from `property`, returning it.
    pub fn remove_keyframe(&mut self, property: &str, frame: u64) -> Option<Keyframe> {
        self.tracks.get_mut(property)?.remove_keyframe(frame)
    }

    /// Effective value of `property` at `frame`; `None` if the property is not animated.
    pub fn evaluate(&self, property: &str, frame: u64) -> Option<PropertyValue> {
        self.tracks.get(property)?.evaluate(frame)
    }

    /// Scalar convenience over [`AnimationSet::evaluate`]; non-scalar values yield `None`.
    pub fn evaluate_f64(&self, property: &str, frame: u64) -> Option<f64> {
        self.evaluate(property, frame).and_then(|v| v.as_f64())
    }

    /// Borrow a track.
    pub fn track(&self, property: &str) -> Option<&PropertyTrack> {
        self.tracks.get(property)
    }

    /// Mutably borrow a track.
    pub fn track_mut(&mut self, property: &str) -> Option<&mut PropertyTrack> {
        self.tracks.get_mut(property)
    }

    /// Iterate tracks in property-name order.
    pub fn tracks(&self) -> impl Iterator<Item = &PropertyTrack> {
        self.tracks.values()
    }

    /// Enable or disable a property's track. Returns `false` if no such track exists.
    pub fn set_enabled(&mut self, property: &str, enabled: bool) -> bool {
        match self.tracks.get_mut(property) {
            Some(track) => {
                track.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// Properties that have at least one key, sorted by name.
    pub fn get_animated_properties(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|(_, t)| t.has_keyframes())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Union of all key frames across tracks, sorted and deduplicated.
    pub fn get_all_keyframe_frames(&self) -> Vec<u64> {
        let frames: BTreeSet<u64> = self
            .tracks
            .values()
            .flat_map(|t| t.keyframes().iter().map(|k| k.frame))
            .collect();
        frames.into_iter().collect()
    }

    /// `true` when any track has a key at `frame`.
    pub fn has_keyframes_at_frame(&self, frame: u64) -> bool {
        self.tracks
            .values()
            .any(|t| t.keyframe_at(frame).is_some())
    }

    /// Properties that have a key exactly at `frame`.
    pub fn properties_with_keyframes_at_frame(&self, frame: u64) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|(_, t)| t.keyframe_at(frame).is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Drop one property's track entirely.
    pub fn clear_property(&mut self, property: &str) -> Option<PropertyTrack> {
        self.tracks.remove(property)
    }

    /// Drop every track.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Persisted JSON representation.
    pub fn to_json(&self) -> ReelResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Load from the persisted JSON representation.
    ///
    /// The top level must be an object; individual tracks that fail to parse are skipped with a
    /// warning.
    pub fn from_json(value: serde_json::Value) -> ReelResult<Self> {
        let serde_json::Value::Object(entries) = value else {
            return Err(ReelError::serde("animation set must be a JSON object"));
        };

        let mut tracks = BTreeMap::new();
        for (name, raw) in entries {
            match serde_json::from_value::<PropertyTrack>(raw) {
                Ok(mut track) => {
                    track.set_property_name(&name);
                    tracks.insert(name, track);
                }
                Err(err) => {
                    tracing::warn!(property = %name, error = %err, "skipping malformed keyframe track");
                }
            }
        }
        Ok(Self { tracks })
    }
}

impl<'de> serde::Deserialize<'de> for AnimationSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/set.rs"]
mod tests;
