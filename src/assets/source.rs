use std::collections::HashMap;

use crate::foundation::{
    core::Raster,
    error::{ReelError, ReelResult},
};

/// Provides raw content for a media reference at a point in time.
///
/// Implementations must be safe to call from several compositing threads at once.
pub trait FrameSource: Send + Sync {
    /// Frame of `media` at `time_secs` (ignored for stills).
    fn get_frame(&self, media: &str, time_secs: f64) -> ReelResult<Raster>;
}

/// Basic metadata about a media reference.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaInfo {
    /// Native frame rate; `None` for stills.
    pub fps: Option<f64>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Answers metadata questions about media references.
pub trait MediaProbe: Send + Sync {
    /// Metadata of `media`.
    fn probe(&self, media: &str) -> ReelResult<MediaInfo>;
}

#[derive(Clone, Debug)]
enum Entry {
    Still(Raster),
    Sequence { fps: f64, frames: Vec<Raster> },
}

/// Frame source holding pre-decoded rasters in memory.
///
/// Stills answer every time with the same raster; sequences pick `floor(t * fps)`, holding the
/// last frame past their end.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    entries: HashMap<String, Entry>,
}

impl InMemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a still under `media`.
    pub fn insert_still(&mut self, media: impl Into<String>, raster: Raster) {
        self.entries.insert(media.into(), Entry::Still(raster));
    }

    /// Register a frame sequence under `media`.
    pub fn insert_sequence(
        &mut self,
        media: impl Into<String>,
        fps: f64,
        frames: Vec<Raster>,
    ) -> ReelResult<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ReelError::validation("sequence fps must be finite and > 0"));
        }
        if frames.is_empty() {
            return Err(ReelError::validation("sequence must contain at least one frame"));
        }
        self.entries
            .insert(media.into(), Entry::Sequence { fps, frames });
        Ok(())
    }

    /// Builder-style [`InMemorySource::insert_still`].
    pub fn with_still(mut self, media: impl Into<String>, raster: Raster) -> Self {
        self.insert_still(media, raster);
        self
    }

    fn entry(&self, media: &str) -> ReelResult<&Entry> {
        self.entries
            .get(media)
            .ok_or_else(|| ReelError::media(format!("unknown media '{media}'")))
    }
}

impl FrameSource for InMemorySource {
    fn get_frame(&self, media: &str, time_secs: f64) -> ReelResult<Raster> {
        match self.entry(media)? {
            Entry::Still(r) => Ok(r.clone()),
            Entry::Sequence { fps, frames } => {
                let idx = (time_secs.max(0.0) * fps + 1e-9).floor() as usize;
                let last = frames.len() - 1;
                Ok(frames[idx.min(last)].clone())
            }
        }
    }
}

impl MediaProbe for InMemorySource {
    fn probe(&self, media: &str) -> ReelResult<MediaInfo> {
        let (fps, first) = match self.entry(media)? {
            Entry::Still(r) => (None, r),
            Entry::Sequence { fps, frames } => (Some(*fps), &frames[0]),
        };
        Ok(MediaInfo {
            fps,
            width: first.width,
            height: first.height,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
