use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;

use crate::{
    assets::{
        media,
        source::{FrameSource, MediaInfo, MediaProbe},
    },
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
    },
    scene::clip::MediaKind,
};

/// Frame source reading media files from disk.
///
/// Stills are decoded with the `image` crate; video frames are extracted with `ffmpeg` when the
/// `media-ffmpeg` feature is enabled. Relative media references resolve against `root`.
#[derive(Debug, Default)]
pub struct DiskFrameSource {
    root: Option<PathBuf>,
    probes: Mutex<HashMap<PathBuf, MediaInfo>>,
}

impl DiskFrameSource {
    /// Resolve media references as given (relative to the working directory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative media references against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            probes: Mutex::new(HashMap::new()),
        }
    }

    /// Filesystem path a media reference points at.
    pub fn resolve(&self, media: &str) -> PathBuf {
        let p = Path::new(media);
        match &self.root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.to_path_buf(),
        }
    }

    fn video_info(&self, path: &Path) -> ReelResult<MediaInfo> {
        let mut probes = self.probes.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(info) = probes.get(path) {
            return Ok(*info);
        }
        let info = media::probe_video(path)?;
        probes.insert(path.to_path_buf(), info);
        Ok(info)
    }
}

/// Decode an encoded still (PNG, JPEG, ...) into a straight-alpha raster.
pub fn decode_image(bytes: &[u8]) -> ReelResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Raster::from_image(dyn_img.to_rgba8())
}

fn read_still(path: &Path) -> ReelResult<Raster> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReelError::media(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

impl FrameSource for DiskFrameSource {
    fn get_frame(&self, media_ref: &str, time_secs: f64) -> ReelResult<Raster> {
        let path = self.resolve(media_ref);
        match MediaKind::from_path(media_ref) {
            MediaKind::Image => read_still(&path),
            MediaKind::Video => {
                let info = self.video_info(&path)?;
                media::decode_video_frame(&path, &info, time_secs)
            }
            kind => Err(ReelError::media(format!(
                "'{media_ref}' is not frame-decodable media ({kind:?})"
            ))),
        }
    }
}

impl MediaProbe for DiskFrameSource {
    fn probe(&self, media_ref: &str) -> ReelResult<MediaInfo> {
        let path = self.resolve(media_ref);
        match MediaKind::from_path(media_ref) {
            MediaKind::Image => {
                let (width, height) = image::image_dimensions(&path)
                    .map_err(|e| ReelError::media(format!("probe '{}': {e}", path.display())))?;
                Ok(MediaInfo {
                    fps: None,
                    width,
                    height,
                })
            }
            MediaKind::Video => self.video_info(&path),
            kind => Err(ReelError::media(format!(
                "'{media_ref}' cannot be probed ({kind:?})"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/disk.rs"]
mod tests;
