//! reelcomp is the rendering core of a non-linear video editor timeline.
//!
//! Given the clips of a timeline and a frame number it produces one composited RGBA raster:
//!
//! - [`animation`] evaluates keyframed clip properties at any frame
//! - [`effects`] runs each clip's effect chain
//! - [`Compositor`] orders active clips by track, fetches their content from a [`FrameSource`],
//!   applies effects and transforms, and blends the layers into the output frame
//!
//! Content comes from the caller through [`FrameSource`]; [`DiskFrameSource`] and
//! [`InMemorySource`] are provided.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod effects;
pub mod foundation;
pub mod render;
pub mod scene;

pub use crate::animation::{
    ease::{ControlPoints, Interpolation},
    keyframe::{Keyframe, PropertyTrack},
    set::AnimationSet,
    value::PropertyValue,
};
pub use crate::assets::{
    disk::DiskFrameSource,
    source::{FrameSource, InMemorySource, MediaInfo, MediaProbe},
};
pub use crate::effects::{
    model::{BlendMode, Effect, EffectKind},
    pipeline::apply_effects,
};
pub use crate::foundation::core::{Affine, Canvas, Raster, Rgb8};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::render::{
    compositor::{Compositor, CompositorOpts},
    layer::Layer,
    transform::{Transform, resolve_transform},
};
pub use crate::scene::{
    clip::{Clip, ClipTransform, ColorAdjust, MediaKind},
    timeline::Timeline,
};
