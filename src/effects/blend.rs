use crate::{
    effects::model::BlendMode,
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
        math::{mul_div255_u16, unit_to_u8},
    },
};

/// One normalized channel of `overlay` blended onto `base`, clamped to `[0, 1]`.
pub fn blend_channel(mode: BlendMode, b: f32, o: f32) -> f32 {
    let v = match mode {
        BlendMode::Normal => o,
        BlendMode::Multiply => b * o,
        BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - o),
        BlendMode::Overlay => {
            if b < 0.5 {
                2.0 * b * o
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - o)
            }
        }
        BlendMode::SoftLight => {
            if o < 0.5 {
                b - (1.0 - 2.0 * o) * b * (1.0 - b)
            } else {
                b + (2.0 * o - 1.0) * (b.sqrt() - b)
            }
        }
        BlendMode::HardLight => {
            if o < 0.5 {
                2.0 * b * o
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - o)
            }
        }
        BlendMode::Add => b + o,
        BlendMode::Subtract => b - o,
    };
    v.clamp(0.0, 1.0)
}

fn check_sizes(a: &Raster, b: &Raster, op: &str) -> ReelResult<()> {
    if a.same_size(b) {
        return Ok(());
    }
    Err(ReelError::effect(format!(
        "{op} expects equal sizes, got {}x{} and {}x{}",
        a.width, a.height, b.width, b.height
    )))
}

/// Blend `overlay` onto `base` per channel. Alpha is taken from `overlay`.
pub fn blend(base: &Raster, overlay: &Raster, mode: BlendMode) -> ReelResult<Raster> {
    check_sizes(base, overlay, "blend")?;
    if mode == BlendMode::Normal {
        return Ok(overlay.clone());
    }

    let mut out = overlay.clone();
    for (dst, b) in out.data.chunks_exact_mut(4).zip(base.data.chunks_exact(4)) {
        for c in 0..3 {
            let bv = f32::from(b[c]) / 255.0;
            let ov = f32::from(dst[c]) / 255.0;
            dst[c] = unit_to_u8(blend_channel(mode, bv, ov));
        }
    }
    Ok(out)
}

/// Linear mix `a * (1 - t) + b * t` over all four channels.
pub fn mix(a: &Raster, b: &Raster, t: f32) -> ReelResult<Raster> {
    check_sizes(a, b, "mix")?;
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255 - tt;

    let mut out = a.clone();
    for (dst, bv) in out.data.chunks_exact_mut(4).zip(b.data.chunks_exact(4)) {
        for c in 0..4 {
            let v = mul_div255_u16(u16::from(dst[c]), it) + mul_div255_u16(u16::from(bv[c]), tt);
            dst[c] = v.min(255) as u8;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
