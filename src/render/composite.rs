use crate::{
    effects::{blend::blend_channel, model::BlendMode},
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
        math::{mul_div255_u16, unit_to_u8},
    },
};

/// Straight-alpha source-over of one pixel at `opacity`.
pub fn over(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let da = mul_div255_u16(u16::from(dst[3]), 255 - sa);
    let oa = sa + da;

    let mut out = [0u8; 4];
    out[3] = oa.min(255) as u8;
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((num + u32::from(oa) / 2) / u32::from(oa)).min(255) as u8;
    }
    out
}

/// Apply `mode` to the color of `src` against `dst`, then source-over at `opacity`.
pub fn blend_over(dst: [u8; 4], src: [u8; 4], mode: BlendMode, opacity: f32) -> [u8; 4] {
    if mode == BlendMode::Normal {
        return over(dst, src, opacity);
    }
    let mut mixed = src;
    for c in 0..3 {
        let b = f32::from(dst[c]) / 255.0;
        let o = f32::from(src[c]) / 255.0;
        mixed[c] = unit_to_u8(blend_channel(mode, b, o));
    }
    over(dst, mixed, opacity)
}

/// Composite a full-frame layer onto `dst`.
pub fn blend_over_in_place(
    dst: &mut Raster,
    src: &Raster,
    mode: BlendMode,
    opacity: f32,
) -> ReelResult<()> {
    if !dst.same_size(src) {
        return Err(ReelError::render(format!(
            "layer is {}x{} but the frame is {}x{}",
            src.width, src.height, dst.width, dst.height
        )));
    }
    for (d, s) in dst.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
        let out = blend_over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], mode, opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Top-left corner that centres a `w x h` overlay in `dst`, shifted by `offset` and clamped so the
/// overlay stays inside the frame where it fits.
pub fn centered_origin(dst: &Raster, w: u32, h: u32, offset: (f64, f64)) -> (i64, i64) {
    let clamp_axis = |frame: u32, size: u32, shift: f64| {
        let base = (i64::from(frame) - i64::from(size)) / 2 + shift.trunc() as i64;
        let max = (i64::from(frame) - i64::from(size)).max(0);
        base.clamp(0, max)
    };
    (
        clamp_axis(dst.width, w, offset.0),
        clamp_axis(dst.height, h, offset.1),
    )
}

/// Composite `src` onto `dst` with its top-left corner at `origin`; parts outside `dst` are cut.
pub fn overlay_at(
    dst: &mut Raster,
    src: &Raster,
    origin: (i64, i64),
    mode: BlendMode,
    opacity: f32,
) {
    let (ox, oy) = origin;
    for sy in 0..src.height {
        let dy = oy + i64::from(sy);
        if dy < 0 || dy >= i64::from(dst.height) {
            continue;
        }
        for sx in 0..src.width {
            let dx = ox + i64::from(sx);
            if dx < 0 || dx >= i64::from(dst.width) {
                continue;
            }
            let (dx, dy) = (dx as u32, dy as u32);
            let out = blend_over(dst.pixel(dx, dy), src.pixel(sx, sy), mode, opacity);
            dst.set_pixel(dx, dy, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
