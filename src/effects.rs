//! Per-clip effect chains.
//!
//! An [`Effect`](model::Effect) is a kind plus free-form parameters. The pipeline runs enabled
//! effects in order, mixing each result over its input by the effect's opacity and compositing it
//! with the effect's blend mode.

pub mod blend;
pub mod blur;
pub mod color;
pub mod model;
pub mod noise;
pub mod pipeline;
pub mod sharpen;
pub mod vignette;
