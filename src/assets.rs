//! Where layer content comes from: frame sources, media probing and synthetic rasters.

pub mod disk;
pub mod media;
pub mod source;
pub mod synth;
