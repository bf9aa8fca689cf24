//! The clip model and the timeline document that carries it.

pub mod clip;
pub mod timeline;
