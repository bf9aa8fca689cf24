pub mod ease;
pub mod keyframe;
pub mod properties;
pub mod set;
pub mod value;
