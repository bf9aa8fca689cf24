//! Color correction: brightness, contrast, gamma, saturation, hue and temperature.
//!
//! Hue uses the 8-bit half-degree wheel (`0..180`), so a hue shift of `90` is a half turn.

use crate::{
    effects::model::Effect,
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
        math::to_u8,
    },
};

/// Color correction settings. All zero (and gamma 1) is the identity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorCorrection {
    /// Additive, `-100..100` maps to `±255`.
    pub brightness: f64,
    /// `-100..100`, pivots around mid-gray.
    pub contrast: f64,
    /// Power-law exponent; must be `> 0`.
    pub gamma: f64,
    /// `-100..100`, multiplicative on HSV saturation.
    pub saturation: f64,
    /// Shift on the `0..180` hue wheel.
    pub hue: f64,
    /// `-100..100`, warm is positive.
    pub temperature: f64,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            gamma: 1.0,
            saturation: 0.0,
            hue: 0.0,
            temperature: 0.0,
        }
    }
}

impl ColorCorrection {
    pub(crate) fn from_effect(fx: &Effect) -> ReelResult<Self> {
        Ok(Self {
            brightness: fx.param_f64("brightness")?,
            contrast: fx.param_f64("contrast")?,
            gamma: fx.param_f64("gamma")?,
            saturation: fx.param_f64("saturation")?,
            hue: fx.param_f64("hue")?,
            temperature: fx.param_f64("temperature")?,
        })
    }

    /// `true` when applying these settings would not change any pixel.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    fn contrast_factor(&self) -> f32 {
        let c = self.contrast / 100.0 * 255.0;
        (259.0 * (c + 255.0) / (255.0 * (259.0 - c))) as f32
    }

    fn gamma_lut(&self) -> [u8; 256] {
        let inv = 1.0 / self.gamma;
        std::array::from_fn(|i| to_u8(((i as f64 / 255.0).powf(inv) * 255.0) as f32))
    }
}

/// Apply `p` to every pixel of `image`; alpha is preserved.
pub fn apply(image: &Raster, p: &ColorCorrection) -> ReelResult<Raster> {
    if !p.gamma.is_finite() || p.gamma <= 0.0 {
        return Err(ReelError::effect(format!(
            "color_correction: gamma must be > 0, got {}",
            p.gamma
        )));
    }
    if p.is_identity() {
        return Ok(image.clone());
    }

    let offset = (p.brightness / 100.0 * 255.0) as f32;
    let factor = p.contrast_factor();
    let lut = (p.gamma != 1.0).then(|| p.gamma_lut());
    let hsv = p.saturation != 0.0 || p.hue != 0.0;
    let sat_mul = (1.0 + p.saturation / 100.0) as f32;
    let hue_shift = p.hue as f32;
    let t = (p.temperature / 100.0) as f32;

    let mut out = image.clone();
    for px in out.data.chunks_exact_mut(4) {
        let mut rgb = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];

        if p.brightness != 0.0 {
            rgb = rgb.map(|v| (v + offset).clamp(0.0, 255.0));
        }
        if p.contrast != 0.0 {
            rgb = rgb.map(|v| (factor * (v - 128.0) + 128.0).clamp(0.0, 255.0));
        }
        if let Some(lut) = &lut {
            rgb = rgb.map(|v| f32::from(lut[usize::from(to_u8(v))]));
        }
        if hsv {
            let (h, s, v) = rgb_to_hsv(rgb);
            let h = (h + hue_shift).rem_euclid(180.0);
            let s = (s * sat_mul).clamp(0.0, 255.0);
            rgb = hsv_to_rgb(h, s, v);
        }
        if t > 0.0 {
            rgb[0] *= 1.0 + 0.3 * t;
            rgb[2] *= 1.0 - 0.1 * t;
        } else if t < 0.0 {
            rgb[2] *= 1.0 - 0.3 * t.abs();
            rgb[0] *= 1.0 + 0.1 * t.abs();
        }

        px[0] = to_u8(rgb[0]);
        px[1] = to_u8(rgb[1]);
        px[2] = to_u8(rgb[2]);
    }
    Ok(out)
}

/// `0..255` RGB into `(h in 0..180, s in 0..255, v in 0..255)`.
pub(crate) fn rgb_to_hsv([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };
    if delta <= 0.0 {
        return (0.0, s, max);
    }
    let mut deg = if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if deg < 0.0 {
        deg += 360.0;
    }
    (deg / 2.0, s, max)
}

/// Inverse of [`rgb_to_hsv`].
pub(crate) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let s = s / 255.0;
    if s <= 0.0 {
        return [v, v, v];
    }
    let sector = (h * 2.0).rem_euclid(360.0) / 60.0;
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
