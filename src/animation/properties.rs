//! Catalog of the properties the editor knows how to animate.

/// Grouping used by editors to lay out property panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    /// Position, scale, rotation, opacity.
    Transform,
    /// Color correction values.
    Color,
    /// Audio levels.
    Audio,
}

/// Default value and valid range of one animatable property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PropertyInfo {
    /// Property name as used in keyframe tracks.
    pub name: &'static str,
    /// Panel grouping.
    pub category: PropertyCategory,
    /// Value used when the property is neither set statically nor animated.
    pub default: f64,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl PropertyInfo {
    /// Clamp `v` into `[min, max]`.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

const fn info(
    name: &'static str,
    category: PropertyCategory,
    default: f64,
    min: f64,
    max: f64,
) -> PropertyInfo {
    PropertyInfo {
        name,
        category,
        default,
        min,
        max,
    }
}

/// Every animatable property.
pub const ANIMATABLE_PROPERTIES: &[PropertyInfo] = &[
    info("position_x", PropertyCategory::Transform, 0.0, -2000.0, 2000.0),
    info("position_y", PropertyCategory::Transform, 0.0, -2000.0, 2000.0),
    info("scale_x", PropertyCategory::Transform, 100.0, 1.0, 1000.0),
    info("scale_y", PropertyCategory::Transform, 100.0, 1.0, 1000.0),
    info("rotation", PropertyCategory::Transform, 0.0, -360.0, 360.0),
    info("opacity", PropertyCategory::Transform, 100.0, 0.0, 100.0),
    info("brightness", PropertyCategory::Color, 0.0, -100.0, 100.0),
    info("contrast", PropertyCategory::Color, 0.0, -100.0, 100.0),
    info("saturation", PropertyCategory::Color, 0.0, -100.0, 100.0),
    info("hue", PropertyCategory::Color, 0.0, -180.0, 180.0),
    info("gamma", PropertyCategory::Color, 1.0, 0.1, 3.0),
    info("volume", PropertyCategory::Audio, 100.0, 0.0, 200.0),
    info("pitch", PropertyCategory::Audio, 0.0, -12.0, 12.0),
];

/// Properties resolved into a clip's per-frame transform.
pub const TRANSFORM_PROPERTIES: [&str; 6] = [
    "position_x",
    "position_y",
    "scale_x",
    "scale_y",
    "rotation",
    "opacity",
];

/// Properties resolved into a clip's per-frame color correction.
pub const COLOR_PROPERTIES: [&str; 5] = ["brightness", "contrast", "saturation", "hue", "gamma"];

/// Look up a property by name.
pub fn property_info(name: &str) -> Option<&'static PropertyInfo> {
    ANIMATABLE_PROPERTIES.iter().find(|p| p.name == name)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/properties.rs"]
mod tests;
