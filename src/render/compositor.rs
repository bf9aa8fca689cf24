use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    animation::properties::COLOR_PROPERTIES,
    assets::{
        source::{FrameSource, MediaProbe},
        synth,
    },
    effects::{color, color::ColorCorrection, pipeline::apply_effects},
    foundation::{
        core::{Canvas, Raster, Rgb8},
        error::{ReelError, ReelResult},
    },
    render::{
        cache::{DEFAULT_CACHE_CAPACITY, LayerCache, LayerKey},
        composite::{blend_over_in_place, centered_origin, overlay_at},
        layer::{Layer, LayerContent, Placement},
        transform::{resolve_transform, warp},
    },
    scene::clip::{Clip, MediaKind},
};

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_fps() -> f64 {
    30.0
}

/// Compositor configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositorOpts {
    /// Output width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Output height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Maximum number of cached layers; `0` disables the cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Render the layers of one frame on the rayon pool. Blending stays in draw order.
    #[serde(default)]
    pub parallel_layers: bool,
    /// Frame rate used for video clips when neither the clip nor the media reports one.
    #[serde(default = "default_fps")]
    pub default_fps: f64,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            cache_capacity: default_cache_capacity(),
            parallel_layers: false,
            default_fps: default_fps(),
        }
    }
}

impl CompositorOpts {
    /// Validate dimensions and frame rate.
    pub fn validate(&self) -> ReelResult<Canvas> {
        if !self.default_fps.is_finite() || self.default_fps <= 0.0 {
            return Err(ReelError::validation("default_fps must be finite and > 0"));
        }
        Canvas::new(self.width, self.height)
    }
}

/// Turns the clips active at a frame into one composited raster.
///
/// `composite_frame` takes `&self` and may run on several threads at once; the layer cache is
/// the only shared mutable state.
pub struct Compositor {
    opts: CompositorOpts,
    canvas: Canvas,
    source: Arc<dyn FrameSource>,
    probe: Option<Arc<dyn MediaProbe>>,
    cache: LayerCache,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("opts", &self.opts)
            .field("cached_layers", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Create a compositor drawing content from `source`.
    pub fn new(opts: CompositorOpts, source: Arc<dyn FrameSource>) -> ReelResult<Self> {
        let canvas = opts.validate()?;
        let cache = LayerCache::new(opts.cache_capacity);
        Ok(Self {
            opts,
            canvas,
            source,
            probe: None,
            cache,
        })
    }

    /// Use `probe` to look up video frame rates.
    pub fn with_probe(mut self, probe: Arc<dyn MediaProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Current options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Change the output size. Every cached layer is dropped.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> ReelResult<()> {
        self.canvas = Canvas::new(width, height)?;
        self.opts.width = width;
        self.opts.height = height;
        self.cache.clear();
        tracing::debug!(width, height, "resolution changed; layer cache cleared");
        Ok(())
    }

    /// Drop every cached layer.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached layers.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn background(&self, color: Rgb8) -> Raster {
        let n = self.canvas.width as usize * self.canvas.height as usize;
        Raster {
            width: self.canvas.width,
            height: self.canvas.height,
            data: color.to_rgba().repeat(n),
        }
    }

    /// Composite every clip active at `frame` over `background`.
    ///
    /// Clips are drawn from the highest track down to track 0, which ends up on top. A clip that
    /// fails to render is logged and left out; the call itself never fails.
    #[tracing::instrument(level = "debug", skip(self, clips), fields(clips = clips.len()))]
    pub fn composite_frame(&self, clips: &[Clip], frame: u64, background: Rgb8) -> Raster {
        let mut out = self.background(background);

        let mut active: Vec<&Clip> = clips.iter().filter(|c| c.contains(frame)).collect();
        active.sort_by(|a, b| b.track.cmp(&a.track));

        let layers: Vec<(&Clip, ReelResult<Layer>)> = if self.opts.parallel_layers {
            active
                .par_iter()
                .map(|c| (*c, self.render_layer(c, frame)))
                .collect()
        } else {
            active
                .iter()
                .map(|c| (*c, self.render_layer(c, frame)))
                .collect()
        };

        let mut drawn = 0usize;
        for (clip, layer) in layers {
            let result = layer.and_then(|l| self.draw_layer(&mut out, &l));
            match result {
                Ok(()) => drawn += 1,
                Err(err) => {
                    tracing::warn!(clip = %clip.id, track = clip.track, error = %err, "skipping clip");
                }
            }
        }
        tracing::debug!(active = active.len(), drawn, "frame composited");
        out
    }

    /// Build the layer for `clip` at absolute `frame`, using the cache when possible.
    pub fn render_layer(&self, clip: &Clip, frame: u64) -> ReelResult<Layer> {
        clip.validate()?;
        let relative_frame = clip.relative_frame(frame).ok_or_else(|| {
            ReelError::render(format!("clip '{}' is not active at frame {frame}", clip.id))
        })?;
        let transform = resolve_transform(clip, relative_frame);

        let key = LayerKey::for_clip(clip, relative_frame)?;
        let content = match self.cache.get(&key) {
            Some(hit) => hit,
            None => {
                let fresh = Arc::new(self.render_content(clip, relative_frame)?);
                self.cache.insert(key, fresh.clone());
                fresh
            }
        };

        Ok(Layer {
            clip_id: clip.id.clone(),
            track: clip.track,
            relative_frame,
            content,
            transform,
            blend_mode: clip.blend_mode,
        })
    }

    fn render_content(&self, clip: &Clip, relative_frame: u64) -> ReelResult<LayerContent> {
        let (raster, placement) = match self.fetch(clip, relative_frame) {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::warn!(clip = %clip.id, media = %clip.media, error = %err, "media unavailable; using placeholder");
                let message = format!("{}\nunavailable", clip.name);
                (synth::placeholder(self.canvas, &message)?, Placement::FullFrame)
            }
        };

        let raster = apply_effects(&raster, &clip.effects, relative_frame);
        let raster = self.apply_color(clip, relative_frame, raster);
        Ok(LayerContent { raster, placement })
    }

    fn fetch(&self, clip: &Clip, relative_frame: u64) -> ReelResult<(Raster, Placement)> {
        match clip.media_kind() {
            MediaKind::Image => {
                let still = self.source.get_frame(&clip.media, 0.0)?;
                Ok((still.fit_within(self.canvas)?, Placement::Centered))
            }
            MediaKind::Video => {
                let fps = self.clip_fps(clip);
                let t = relative_frame as f64 / fps;
                let frame = self.source.get_frame(&clip.media, t)?;
                Ok((
                    frame.resized(self.canvas.width, self.canvas.height)?,
                    Placement::FullFrame,
                ))
            }
            MediaKind::Audio => Ok((
                synth::audio_waveform(self.canvas, relative_frame, &clip.name)?,
                Placement::FullFrame,
            )),
            MediaKind::Text => Ok((
                synth::text_card(self.canvas, &clip.media)?,
                Placement::FullFrame,
            )),
        }
    }

    fn clip_fps(&self, clip: &Clip) -> f64 {
        if let Some(fps) = clip.fps {
            return fps;
        }
        let probed = self
            .probe
            .as_ref()
            .and_then(|p| match p.probe(&clip.media) {
                Ok(info) => info.fps,
                Err(err) => {
                    tracing::debug!(media = %clip.media, error = %err, "probe failed");
                    None
                }
            })
            .filter(|fps| fps.is_finite() && *fps > 0.0);
        probed.unwrap_or(self.opts.default_fps)
    }

    fn apply_color(&self, clip: &Clip, relative_frame: u64, raster: Raster) -> Raster {
        let cc = resolve_color(clip, relative_frame);
        if cc.is_identity() {
            return raster;
        }
        match color::apply(&raster, &cc) {
            Ok(corrected) => corrected,
            Err(err) => {
                tracing::warn!(clip = %clip.id, error = %err, "color correction failed; skipping");
                raster
            }
        }
    }

    fn draw_layer(&self, out: &mut Raster, layer: &Layer) -> ReelResult<()> {
        let opacity = layer.transform.opacity_factor();
        let raster = &layer.content.raster;
        match layer.content.placement {
            Placement::Centered => {
                let origin = centered_origin(
                    out,
                    raster.width,
                    raster.height,
                    (layer.transform.position_x, layer.transform.position_y),
                );
                overlay_at(out, raster, origin, layer.blend_mode, opacity);
                Ok(())
            }
            Placement::FullFrame => {
                let affine = layer.transform.affine(self.canvas);
                let warped = warp(raster, affine, self.canvas.width, self.canvas.height)?;
                blend_over_in_place(out, &warped, layer.blend_mode, opacity)
            }
        }
    }
}

/// Color correction for `clip` at `relative_frame`: static values overridden by animated ones.
pub fn resolve_color(clip: &Clip, relative_frame: u64) -> ColorCorrection {
    let mut cc = clip.color.correction();
    for property in COLOR_PROPERTIES {
        let Some(v) = clip.animation.evaluate_f64(property, relative_frame) else {
            continue;
        };
        match property {
            "brightness" => cc.brightness = v,
            "contrast" => cc.contrast = v,
            "saturation" => cc.saturation = v,
            "hue" => cc.hue = v,
            "gamma" => cc.gamma = v,
            _ => {}
        }
    }
    cc
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
