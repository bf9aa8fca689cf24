use crate::animation::{
    ease::{ControlPoints, Interpolation},
    value::PropertyValue,
};

/// One pinned `(frame, value)` pair plus the interpolation law used toward the next key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Clip-relative frame number.
    pub frame: u64,
    /// Value at `frame`.
    pub value: PropertyValue,
    /// Law applied between this key and the next one.
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Only meaningful for [`Interpolation::Bezier`].
    #[serde(default)]
    pub bezier_control_points: ControlPoints,
}

impl Keyframe {
    /// Key with default Bézier control points.
    pub fn new(frame: u64, value: impl Into<PropertyValue>, interpolation: Interpolation) -> Self {
        Self {
            frame,
            value: value.into(),
            interpolation,
            bezier_control_points: ControlPoints::default(),
        }
    }

    fn interpolate_toward(&self, next: &Keyframe, frame: u64) -> PropertyValue {
        assert!(
            self.frame < frame && frame < next.frame,
            "keyframe bracket invariant violated: {} < {frame} < {}",
            self.frame,
            next.frame
        );
        if self.interpolation == Interpolation::Hold {
            return self.value.clone();
        }

        let span = (next.frame - self.frame) as f64;
        let progress = (frame - self.frame) as f64 / span;
        let progress = self
            .interpolation
            .reshape(progress, &self.bezier_control_points);
        PropertyValue::interpolate(&self.value, &next.value, progress)
    }
}

/// Ordered keyframes for one animatable property.
///
/// Keys are unique by frame and always sorted ascending; every mutation preserves this, and
/// loading normalizes persisted data into that shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "PersistedTrack")]
pub struct PropertyTrack {
    property_name: String,
    enabled: bool,
    keyframes: Vec<Keyframe>,
}

#[derive(serde::Deserialize)]
struct PersistedTrack {
    #[serde(default)]
    property_name: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

fn enabled_by_default() -> bool {
    true
}

impl From<PersistedTrack> for PropertyTrack {
    fn from(raw: PersistedTrack) -> Self {
        let mut track = PropertyTrack::new(raw.property_name);
        track.enabled = raw.enabled;
        for key in raw.keyframes {
            track.insert(key);
        }
        track
    }
}

impl PropertyTrack {
    /// Empty, enabled track.
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            enabled: true,
            keyframes: Vec::new(),
        }
    }

    /// Name of the animated property.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub(crate) fn set_property_name(&mut self, name: &str) {
        if self.property_name != name {
            self.property_name = name.to_string();
        }
    }

    /// Whether [`PropertyTrack::evaluate`] produces values.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the whole track without dropping its keys.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Keys in ascending frame order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// `true` when at least one key exists.
    pub fn has_keyframes(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Frames of all keys, ascending.
    pub fn keyframe_frames(&self) -> Vec<u64> {
        self.keyframes.iter().map(|k| k.frame).collect()
    }

    /// Key pinned exactly at `frame`.
    pub fn keyframe_at(&self, frame: u64) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by_key(&frame, |k| k.frame)
            .ok()
            .map(|i| &self.keyframes[i])
    }

    /// Insert a key, replacing any key already at the same frame.
    pub fn add_keyframe(
        &mut self,
        frame: u64,
        value: impl Into<PropertyValue>,
        interpolation: Interpolation,
    ) {
        tracing::trace!(property = %self.property_name, frame, %interpolation, "add keyframe");
        self.insert(Keyframe::new(frame, value, interpolation));
    }

    /// Insert a [`Interpolation::Bezier`] key with explicit control points.
    pub fn add_bezier_keyframe(
        &mut self,
        frame: u64,
        value: impl Into<PropertyValue>,
        control_points: ControlPoints,
    ) {
        let mut key = Keyframe::new(frame, value, Interpolation::Bezier);
        key.bezier_control_points = control_points;
        self.insert(key);
    }

    /// Replace the control points of the key at `frame`. Returns `false` when there is no such key.
    pub fn set_control_points(&mut self, frame: u64, control_points: ControlPoints) -> bool {
        match self.keyframes.binary_search_by_key(&frame, |k| k.frame) {
            Ok(i) => {
                self.keyframes[i].bezier_control_points = control_points;
                true
            }
            Err(_) => false,
        }
    }

    /// Insert a fully specified key, replacing any key at the same frame.
    pub fn insert(&mut self, key: Keyframe) {
        match self.keyframes.binary_search_by_key(&key.frame, |k| k.frame) {
            Ok(i) => self.keyframes[i] = key,
            Err(i) => self.keyframes.insert(i, key),
        }
        debug_assert!(self.keyframes.windows(2).all(|w| w[0].frame < w[1].frame));
    }

    /// Remove the key at `frame`, returning it.
    pub fn remove_keyframe(&mut self, frame: u64) -> Option<Keyframe> {
        let i = self
            .keyframes
            .binary_search_by_key(&frame, |k| k.frame)
            .ok()?;
        Some(self.keyframes.remove(i))
    }

    /// Effective value at `frame`, or `None` when disabled or empty.
    pub fn evaluate(&self, frame: u64) -> Option<PropertyValue> {
        if !self.enabled {
            return None;
        }
        let first = self.keyframes.first()?;

        let idx = self.keyframes.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Some(first.value.clone());
        }

        let prev = &self.keyframes[idx - 1];
        if prev.frame == frame {
            return Some(prev.value.clone());
        }
        let Some(next) = self.keyframes.get(idx) else {
            return Some(prev.value.clone());
        };

        Some(prev.interpolate_toward(next, frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
