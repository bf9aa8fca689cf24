use crate::{
    effects::{blur::gaussian_blur, model::Effect},
    foundation::{core::Raster, error::ReelResult, math::to_u8},
};

/// Parsed `sharpen` parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharpenParams {
    /// Strength in percent; `100` doubles local contrast.
    pub amount: f64,
    /// Radius of the blur the image is sharpened against.
    pub radius: u32,
}

impl SharpenParams {
    pub(crate) fn from_effect(fx: &Effect) -> ReelResult<Self> {
        Ok(Self {
            amount: fx.param_f64("amount")?,
            radius: fx.param_u32("radius")?.max(1),
        })
    }
}

/// Unsharp mask: `v * (1 + a) - blur(v) * a` on the color channels.
pub(crate) fn apply(image: &Raster, p: &SharpenParams) -> ReelResult<Raster> {
    let a = (p.amount / 100.0) as f32;
    if a == 0.0 {
        return Ok(image.clone());
    }
    let blurred = gaussian_blur(image, p.radius)?;

    let mut out = image.clone();
    for (dst, soft) in out
        .data
        .chunks_exact_mut(4)
        .zip(blurred.data.chunks_exact(4))
    {
        for c in 0..3 {
            dst[c] = to_u8(f32::from(dst[c]) * (1.0 + a) - f32::from(soft[c]) * a);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sharpen.rs"]
mod tests;
