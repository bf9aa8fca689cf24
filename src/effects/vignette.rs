use crate::{
    effects::model::Effect,
    foundation::{core::Raster, error::ReelResult, math::to_u8},
};

/// Parsed `vignette` parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteParams {
    /// Darkening at the corners, percent.
    pub amount: f64,
    /// Radius (percent of the half-extent) inside which nothing is darkened.
    pub size: f64,
}

impl VignetteParams {
    pub(crate) fn from_effect(fx: &Effect) -> ReelResult<Self> {
        Ok(Self {
            amount: fx.param_f64("amount")?,
            size: fx.param_f64("size")?,
        })
    }
}

/// Brightness multiplier for a normalized distance `d` from the centre.
pub(crate) fn falloff(d: f32, size: f32, amount: f32) -> f32 {
    if size >= 1.0 {
        return 1.0;
    }
    let ramp = ((d - size) / (1.0 - size)).clamp(0.0, 1.0);
    (1.0 - ramp * amount).max(0.0)
}

pub(crate) fn apply(image: &Raster, p: &VignetteParams) -> ReelResult<Raster> {
    let amount = (p.amount / 100.0) as f32;
    let size = (p.size / 100.0).max(0.0) as f32;
    if amount == 0.0 || size >= 1.0 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width, image.height);
    let (cx, cy) = ((w / 2) as f32, (h / 2) as f32);
    let (hx, hy) = ((w as f32 / 2.0).max(0.5), (h as f32 / 2.0).max(0.5));

    let mut out = image.clone();
    for (i, px) in out.data.chunks_exact_mut(4).enumerate() {
        let x = (i as u32 % w) as f32;
        let y = (i as u32 / w) as f32;
        let dx = (x - cx) / hx;
        let dy = (y - cy) / hy;
        let mask = falloff((dx * dx + dy * dy).sqrt(), size, amount);
        for c in &mut px[..3] {
            *c = to_u8(f32::from(*c) * mask);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/vignette.rs"]
mod tests;
