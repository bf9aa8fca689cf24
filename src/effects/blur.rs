use std::collections::BTreeSet;

use crate::{
    effects::model::Effect,
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
        math::to_u8,
    },
};

/// Blur variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurType {
    /// Separable gaussian.
    Gaussian,
    /// Line kernel along `angle`.
    Motion,
    /// Rendered as a gaussian of the same radius.
    Radial,
}

impl BlurType {
    fn parse(s: &str) -> ReelResult<Self> {
        match s {
            "gaussian" => Ok(Self::Gaussian),
            "motion" => Ok(Self::Motion),
            "radial" => Ok(Self::Radial),
            other => Err(ReelError::effect(format!("blur: unknown type '{other}'"))),
        }
    }
}

/// Parsed `blur` parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurParams {
    /// Kernel radius in pixels, at least 1.
    pub radius: u32,
    /// Variant.
    pub kind: BlurType,
    /// Motion direction in degrees.
    pub angle: f64,
}

impl BlurParams {
    pub(crate) fn from_effect(fx: &Effect) -> ReelResult<Self> {
        Ok(Self {
            radius: fx.param_u32("radius")?.max(1),
            kind: BlurType::parse(&fx.param_str("type")?)?,
            angle: fx.param_f64("angle")?,
        })
    }
}

pub(crate) fn apply(image: &Raster, p: &BlurParams) -> ReelResult<Raster> {
    match p.kind {
        BlurType::Gaussian | BlurType::Radial => gaussian_blur(image, p.radius),
        BlurType::Motion => motion_blur(image, p.radius, p.angle),
    }
}

/// Sigma derived from a `2r + 1` kernel size, matching the usual automatic-sigma rule.
pub(crate) fn sigma_for_radius(radius: u32) -> f32 {
    let ksize = 2.0 * radius as f32 + 1.0;
    0.3 * ((ksize - 1.0) * 0.5 - 1.0) + 0.8
}

/// Radius actually used on `image`: past the longer side every tap lands on a clamped edge.
pub(crate) fn effective_radius(image: &Raster, radius: u32) -> u32 {
    radius.min(image.width.max(image.height))
}

/// Separable gaussian blur over all four channels with clamp-to-edge sampling.
pub fn gaussian_blur(image: &Raster, radius: u32) -> ReelResult<Raster> {
    let radius = effective_radius(image, radius);
    if radius == 0 {
        return Ok(image.clone());
    }
    let weights = gaussian_weights(radius, sigma_for_radius(radius))?;
    let rows = separable_pass(image, &weights, Axis::Horizontal);
    Ok(separable_pass(&rows, &weights, Axis::Vertical))
}

const Q16_ONE: u64 = 1 << 16;

/// Weights for taps `-radius..=radius` in q16; they always sum to exactly one.
fn gaussian_weights(radius: u32, sigma: f32) -> ReelResult<Vec<u64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::effect("blur sigma must be > 0"));
    }
    let two_var = 2.0 * f64::from(sigma).powi(2);
    let r = i64::from(radius);
    let falloff: Vec<f64> = (-r..=r).map(|i| (-((i * i) as f64) / two_var).exp()).collect();
    let total: f64 = falloff.iter().sum();

    let mut weights: Vec<u64> = falloff
        .iter()
        .map(|f| (f / total * Q16_ONE as f64).round() as u64)
        .collect();
    // Rounding drift goes to the centre tap.
    let sum: u64 = weights.iter().sum();
    let mid = radius as usize;
    weights[mid] = (weights[mid] + Q16_ONE).saturating_sub(sum).min(Q16_ONE);
    Ok(weights)
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One 1D convolution along `axis`, clamp-to-edge.
fn separable_pass(src: &Raster, weights: &[u64], axis: Axis) -> Raster {
    let radius = (weights.len() / 2) as i64;
    let (w, h) = (i64::from(src.width), i64::from(src.height));
    let mut out = src.clone();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (k, &weight) in weights.iter().enumerate() {
                let offset = k as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + offset).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + offset).clamp(0, h - 1)),
                };
                let px = src.pixel(sx as u32, sy as u32);
                for (a, v) in acc.iter_mut().zip(px) {
                    *a += weight * u64::from(v);
                }
            }
            out.set_pixel(x as u32, y as u32, acc.map(q16_to_u8));
        }
    }
    out
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + Q16_ONE / 2) >> 16).min(255) as u8
}

/// Sparse 2D kernel: `(dx, dy, weight)` taps relative to the output pixel.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Taps(pub(crate) Vec<(i32, i32, f32)>);

/// Normalized line kernel of size `2r + 1` through the centre along `angle_deg`.
pub(crate) fn motion_kernel(radius: u32, angle_deg: f64) -> Taps {
    let r = i64::from(radius);
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    let hits: BTreeSet<(i64, i64)> = (-r..=r)
        .filter_map(|d| {
            let x = (r as f64 + d as f64 * cos) as i64 - r;
            let y = (r as f64 + d as f64 * sin) as i64 - r;
            (x.abs() <= r && y.abs() <= r).then_some((y, x))
        })
        .collect();

    let weight = 1.0 / hits.len().max(1) as f32;
    Taps(
        hits.into_iter()
            .map(|(dy, dx)| (dx as i32, dy as i32, weight))
            .collect(),
    )
}

/// Convolve with a sparse kernel, clamp-to-edge, all four channels.
pub(crate) fn convolve(image: &Raster, taps: &Taps) -> ReelResult<Raster> {
    let (w, h) = (image.width as i32, image.height as i32);
    let src = &image.data;
    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 4];
            for &(dx, dy, kw) in &taps.0 {
                let sx = (x + dx).clamp(0, w - 1);
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += kw * f32::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                out[out_idx + c] = to_u8(acc[c]);
            }
        }
    }
    Raster::from_rgba8(image.width, image.height, out)
}

fn motion_blur(image: &Raster, radius: u32, angle: f64) -> ReelResult<Raster> {
    let taps = motion_kernel(effective_radius(image, radius).max(1), angle);
    if taps.0.is_empty() {
        return Err(ReelError::effect("motion blur kernel is empty"));
    }
    convolve(image, &taps)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
