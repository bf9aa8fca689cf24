//! Video probing and frame extraction through the `ffprobe`/`ffmpeg` executables.
//!
//! Only available with the `media-ffmpeg` feature; without it every call reports a media error.

use std::path::Path;

use crate::{
    assets::source::MediaInfo,
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
    },
};

#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(path: &Path) -> ReelResult<MediaInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .map_err(|e| ReelError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::media(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ReelError::media(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ReelError::media(format!("no video stream in '{}'", path.display())))?;
    let (Some(width), Some(height)) = (stream.width, stream.height) else {
        return Err(ReelError::media("missing video dimensions from ffprobe"));
    };
    let fps = parse_ff_ratio(stream.r_frame_rate.as_deref().unwrap_or("0/1"));

    Ok(MediaInfo { fps, width, height })
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_video(path: &Path) -> ReelResult<MediaInfo> {
    Err(ReelError::media(format!(
        "cannot probe '{}': video support requires the 'media-ffmpeg' feature",
        path.display()
    )))
}

/// Decode the frame shown at `time_secs` as RGBA8 at the stream's native size.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_video_frame(path: &Path, info: &MediaInfo, time_secs: f64) -> ReelResult<Raster> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{:.9}", time_secs.max(0.0))])
        .arg("-i")
        .arg(path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| ReelError::media(format!("failed to run ffmpeg: {e}")))?;

    if !out.status.success() {
        return Err(ReelError::media(format!(
            "ffmpeg decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected = info.width as usize * info.height as usize * 4;
    if expected == 0 || out.stdout.len() < expected {
        return Err(ReelError::media(format!(
            "ffmpeg returned {} bytes for '{}', expected {expected}",
            out.stdout.len(),
            path.display()
        )));
    }
    let mut bytes = out.stdout;
    bytes.truncate(expected);
    Raster::from_rgba8(info.width, info.height, bytes)
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_video_frame(path: &Path, _info: &MediaInfo, _time_secs: f64) -> ReelResult<Raster> {
    Err(ReelError::media(format!(
        "cannot decode '{}': video support requires the 'media-ffmpeg' feature",
        path.display()
    )))
}

#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
fn parse_ff_ratio(s: &str) -> Option<f64> {
    let (a, b) = s.split_once('/').unwrap_or((s, "1"));
    let a = a.trim().parse::<f64>().ok()?;
    let b = b.trim().parse::<f64>().ok()?;
    if b == 0.0 || a <= 0.0 {
        return None;
    }
    Some(a / b)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
