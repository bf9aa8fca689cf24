use std::path::Path;

use crate::{
    animation::set::AnimationSet,
    effects::{
        color::ColorCorrection,
        model::{BlendMode, Effect},
    },
    foundation::error::{ReelError, ReelResult},
};

/// What kind of content a clip draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Decoded frame by frame at the clip's fps.
    Video,
    /// A still, letterboxed and overlaid.
    Image,
    /// Drawn as a synthetic waveform.
    Audio,
    /// The media string rendered as text.
    Text,
}

impl MediaKind {
    /// Guess the kind from a file extension. Unknown or missing extensions are text.
    pub fn from_path(media: &str) -> Self {
        let ext = Path::new(media)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("mp4" | "avi" | "mov" | "mkv" | "wmv" | "flv" | "webm") => Self::Video,
            Some("mp3" | "wav" | "aac" | "ogg" | "m4a" | "flac") => Self::Audio,
            Some("jpg" | "jpeg" | "png" | "bmp" | "gif" | "tif" | "tiff" | "webp") => Self::Image,
            _ => Self::Text,
        }
    }
}

/// Static (non-animated) placement of a clip.
///
/// Positions are pixel offsets from the centre, scales and opacity are percentages,
/// rotation is in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClipTransform {
    /// Horizontal offset in pixels.
    pub position_x: f64,
    /// Vertical offset in pixels.
    pub position_y: f64,
    /// Horizontal scale, percent.
    pub scale_x: f64,
    /// Vertical scale, percent.
    pub scale_y: f64,
    /// Degrees, counter-clockwise.
    pub rotation: f64,
    /// Percent.
    pub opacity: f64,
}

impl Default for ClipTransform {
    fn default() -> Self {
        Self {
            position_x: 0.0,
            position_y: 0.0,
            scale_x: 100.0,
            scale_y: 100.0,
            rotation: 0.0,
            opacity: 100.0,
        }
    }
}

/// Static color correction of a clip, in the same units as the animated color properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorAdjust {
    /// `-100..100`.
    pub brightness: f64,
    /// `-100..100`.
    pub contrast: f64,
    /// `-100..100`.
    pub saturation: f64,
    /// Shift on the `0..180` hue wheel.
    pub hue: f64,
    /// Power-law exponent.
    pub gamma: f64,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            hue: 0.0,
            gamma: 1.0,
        }
    }
}

impl ColorAdjust {
    /// Equivalent color correction settings.
    pub fn correction(&self) -> ColorCorrection {
        ColorCorrection {
            brightness: self.brightness,
            contrast: self.contrast,
            gamma: self.gamma,
            saturation: self.saturation,
            hue: self.hue,
            temperature: 0.0,
        }
    }
}

fn default_duration() -> u64 {
    90
}

/// A span of media placed on a timeline track.
///
/// Every field has a serde default so partially written documents load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Opaque media reference handed to the frame source.
    #[serde(default)]
    pub media: String,
    /// Content kind; inferred from `media` when absent.
    #[serde(default)]
    pub kind: Option<MediaKind>,
    /// First frame (inclusive) on the timeline.
    #[serde(default)]
    pub start_frame: u64,
    /// Length in frames, at least 1.
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Track index; higher tracks are drawn first, track 0 on top.
    #[serde(default)]
    pub track: i32,
    /// Media frame rate override.
    #[serde(default)]
    pub fps: Option<f64>,
    /// Static placement.
    #[serde(default)]
    pub transform: ClipTransform,
    /// Static color correction.
    #[serde(default)]
    pub color: ColorAdjust,
    /// Effect chain, applied in order.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// How the rendered layer combines with the layers beneath it.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Keyframed properties. Keyframe frames are relative to `start_frame`.
    #[serde(default)]
    pub animation: AnimationSet,
}

impl Clip {
    /// A clip with default placement and no effects or animation.
    pub fn new(
        id: impl Into<String>,
        media: impl Into<String>,
        start_frame: u64,
        duration: u64,
        track: i32,
    ) -> Self {
        let media = media.into();
        let name = Path::new(&media)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&media)
            .to_string();
        Self {
            id: id.into(),
            name,
            media,
            kind: None,
            start_frame,
            duration,
            track,
            fps: None,
            transform: ClipTransform::default(),
            color: ColorAdjust::default(),
            effects: Vec::new(),
            blend_mode: BlendMode::Normal,
            animation: AnimationSet::new(),
        }
    }

    /// Builder-style explicit kind.
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Explicit kind, or the one inferred from the media reference.
    pub fn media_kind(&self) -> MediaKind {
        self.kind.unwrap_or_else(|| MediaKind::from_path(&self.media))
    }

    /// First frame after the clip.
    pub fn end_frame(&self) -> u64 {
        self.start_frame.saturating_add(self.duration)
    }

    /// `start_frame <= frame < end_frame`.
    pub fn contains(&self, frame: u64) -> bool {
        self.start_frame <= frame && frame < self.end_frame()
    }

    /// Frame relative to the clip start, if the clip is active at `frame`.
    pub fn relative_frame(&self, frame: u64) -> Option<u64> {
        self.contains(frame).then(|| frame - self.start_frame)
    }

    /// `true` when both clips share a track and their frame ranges intersect.
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.track == other.track
            && self.start_frame < other.end_frame()
            && other.start_frame < self.end_frame()
    }

    /// Check the invariants that serde defaults cannot express.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration == 0 {
            return Err(ReelError::validation(format!(
                "clip '{}': duration must be >= 1",
                self.id
            )));
        }
        if self.fps.is_some_and(|fps| !fps.is_finite() || fps <= 0.0) {
            return Err(ReelError::validation(format!(
                "clip '{}': fps must be finite and > 0",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/clip.rs"]
mod tests;
