/// `x * y / 255`, rounded.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round and clamp a 0..255 float channel into `u8`.
pub(crate) fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Round and clamp a normalized `[0, 1]` channel into `u8`.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    to_u8(v * 255.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
