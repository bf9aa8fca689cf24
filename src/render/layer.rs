use std::sync::Arc;

use crate::{
    effects::model::BlendMode,
    foundation::core::Raster,
    render::transform::Transform,
};

/// How a layer's raster is positioned in the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Letterboxed still, centred and shifted by the position only.
    Centered,
    /// Frame-sized raster warped by the full transform.
    FullFrame,
}

/// Rendered content of a clip for one relative frame, before placement.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerContent {
    /// Content after effects and color correction.
    pub raster: Raster,
    /// How to position `raster`.
    pub placement: Placement,
}

/// One clip ready to be composited at one frame.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Source clip id.
    pub clip_id: String,
    /// Source clip track.
    pub track: i32,
    /// Frame relative to the clip start.
    pub relative_frame: u64,
    /// Shared with the layer cache.
    pub content: Arc<LayerContent>,
    /// Placement at this frame.
    pub transform: Transform,
    /// How the layer combines with what is beneath it.
    pub blend_mode: BlendMode,
}
