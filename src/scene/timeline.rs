use std::{collections::HashSet, path::Path};

use crate::{
    foundation::{
        core::Rgb8,
        error::{ReelError, ReelResult},
    },
    render::compositor::CompositorOpts,
    scene::clip::Clip,
};

/// Everything needed to render frames of a timeline: output options, background and clips.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Compositor configuration.
    #[serde(default)]
    pub opts: CompositorOpts,
    /// Fill behind all clips.
    #[serde(default)]
    pub background: Rgb8,
    /// Clips in any order.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Timeline {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let timeline: Self = serde_json::from_str(s)?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Read, parse and validate a JSON document from disk.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::validation(format!("read timeline '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check options, every clip, and that non-empty clip ids are unique.
    pub fn validate(&self) -> ReelResult<()> {
        self.opts.validate()?;
        let mut seen = HashSet::new();
        for clip in &self.clips {
            clip.validate()?;
            if !clip.id.is_empty() && !seen.insert(clip.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
        }
        Ok(())
    }

    /// Clips active at `frame`, in document order.
    pub fn active_clips(&self, frame: u64) -> Vec<&Clip> {
        self.clips.iter().filter(|c| c.contains(frame)).collect()
    }

    /// First frame after the last clip ends; `0` for an empty timeline.
    pub fn duration_frames(&self) -> u64 {
        self.clips.iter().map(Clip::end_frame).max().unwrap_or(0)
    }

    /// Clip with the given id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Mutable clip with the given id.
    pub fn clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
