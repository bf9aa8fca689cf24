//! Per-frame compositing: transforms, layers, the layer cache and the compositor.

pub mod cache;
pub mod composite;
pub mod compositor;
pub mod layer;
pub mod transform;
