use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    effects::model::Effect,
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
        math::to_u8,
    },
};

/// Noise distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseType {
    /// Normal distribution, sigma = amount.
    Gaussian,
    /// Uniform in `±amount`.
    Uniform,
    /// Pixels forced to black or white with probability `amount`.
    SaltPepper,
}

impl NoiseType {
    fn parse(s: &str) -> ReelResult<Self> {
        match s {
            "gaussian" => Ok(Self::Gaussian),
            "uniform" => Ok(Self::Uniform),
            "salt_pepper" | "salt-pepper" => Ok(Self::SaltPepper),
            other => Err(ReelError::effect(format!("noise: unknown type '{other}'"))),
        }
    }
}

/// Parsed `noise` parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Strength in percent, `0..=100`.
    pub amount: f64,
    /// Distribution.
    pub kind: NoiseType,
    /// Same offset on all three color channels.
    pub monochrome: bool,
    /// Base seed, combined with the frame number.
    pub seed: u64,
}

impl NoiseParams {
    pub(crate) fn from_effect(fx: &Effect) -> ReelResult<Self> {
        Ok(Self {
            amount: fx.param_f64("amount")?.clamp(0.0, 100.0),
            kind: NoiseType::parse(&fx.param_str("type")?)?,
            monochrome: fx.param_bool("monochrome")?,
            seed: fx.param_u64("seed")?,
        })
    }
}

fn frame_rng(seed: u64, frame: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Standard normal sample via Box-Muller.
fn standard_normal(rng: &mut SmallRng) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.r#gen();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

/// Add noise; the result depends only on the image, the parameters and `frame`.
pub(crate) fn apply(image: &Raster, p: &NoiseParams, frame: u64) -> ReelResult<Raster> {
    let amount = (p.amount.clamp(0.0, 100.0) / 100.0) as f32;
    if !(amount > 0.0) {
        return Ok(image.clone());
    }
    let scale = amount * 255.0;
    if !scale.is_finite() {
        return Err(ReelError::effect("noise: amount is not finite"));
    }
    let mut rng = frame_rng(p.seed, frame);
    let mut out = image.clone();

    match p.kind {
        NoiseType::Gaussian | NoiseType::Uniform => {
            let sample = |rng: &mut SmallRng| match p.kind {
                NoiseType::Gaussian => standard_normal(rng) * scale,
                _ => rng.gen_range(-scale..=scale),
            };
            for px in out.data.chunks_exact_mut(4) {
                if p.monochrome {
                    let n = sample(&mut rng);
                    for c in &mut px[..3] {
                        *c = to_u8(f32::from(*c) + n);
                    }
                } else {
                    for c in &mut px[..3] {
                        *c = to_u8(f32::from(*c) + sample(&mut rng));
                    }
                }
            }
        }
        NoiseType::SaltPepper => {
            let prob = f64::from(amount);
            for px in out.data.chunks_exact_mut(4) {
                if p.monochrome {
                    if rng.gen_bool(prob) {
                        let v = if rng.r#gen::<bool>() { 255 } else { 0 };
                        px[..3].fill(v);
                    }
                } else {
                    for c in &mut px[..3] {
                        if rng.gen_bool(prob) {
                            *c = if rng.r#gen::<bool>() { 255 } else { 0 };
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/noise.rs"]
mod tests;
