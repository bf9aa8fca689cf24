use resvg::tiny_skia;

use crate::{
    animation::properties::TRANSFORM_PROPERTIES,
    foundation::{
        core::{Affine, Canvas, Raster, Vec2},
        error::{ReelError, ReelResult},
    },
    scene::clip::{Clip, ClipTransform},
};

/// Opacity (percent) below which a resolved layer is drawn fully opaque instead.
pub const OPACITY_GUARD: f64 = 50.0;

/// Placement of one clip at one frame, after animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Horizontal offset in pixels.
    pub position_x: f64,
    /// Vertical offset in pixels.
    pub position_y: f64,
    /// Horizontal scale, percent.
    pub scale_x: f64,
    /// Vertical scale, percent.
    pub scale_y: f64,
    /// Degrees, counter-clockwise on screen.
    pub rotation: f64,
    /// Percent.
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        ClipTransform::default().into()
    }
}

impl From<ClipTransform> for Transform {
    fn from(t: ClipTransform) -> Self {
        Self {
            position_x: t.position_x,
            position_y: t.position_y,
            scale_x: t.scale_x,
            scale_y: t.scale_y,
            rotation: t.rotation,
            opacity: t.opacity,
        }
    }
}

impl Transform {
    fn slot(&mut self, property: &str) -> Option<&mut f64> {
        match property {
            "position_x" => Some(&mut self.position_x),
            "position_y" => Some(&mut self.position_y),
            "scale_x" => Some(&mut self.scale_x),
            "scale_y" => Some(&mut self.scale_y),
            "rotation" => Some(&mut self.rotation),
            "opacity" => Some(&mut self.opacity),
            _ => None,
        }
    }

    /// Opacity as a `[0, 1]` factor.
    pub fn opacity_factor(&self) -> f32 {
        (self.opacity / 100.0).clamp(0.0, 1.0) as f32
    }

    /// Pixel-space mapping of a full-frame layer: rotate about the centre, then scale about the
    /// centre, then translate.
    ///
    /// Areas the mapped layer no longer covers are left transparent, not black, so the layers
    /// beneath show through.
    pub fn affine(&self, canvas: Canvas) -> Affine {
        let c = canvas.center();
        let about_center = |m: Affine| {
            Affine::translate(c.to_vec2()) * m * Affine::translate(-c.to_vec2())
        };
        let rotate = about_center(Affine::rotate(-self.rotation.to_radians()));
        let scale = about_center(Affine::scale_non_uniform(
            self.scale_x / 100.0,
            self.scale_y / 100.0,
        ));
        let translate = Affine::translate(Vec2::new(self.position_x, self.position_y));
        translate * scale * rotate
    }
}

/// Resolve a clip's transform at `relative_frame`.
///
/// Static values come first; every animated transform property overrides its static value. A
/// resolved opacity below [`OPACITY_GUARD`] is forced to 100.
pub fn resolve_transform(clip: &Clip, relative_frame: u64) -> Transform {
    let mut t = Transform::from(clip.transform);
    for property in TRANSFORM_PROPERTIES {
        let Some(v) = clip.animation.evaluate_f64(property, relative_frame) else {
            continue;
        };
        if let Some(slot) = t.slot(property) {
            *slot = v;
        }
    }
    if t.opacity < OPACITY_GUARD {
        t.opacity = 100.0;
    }
    t
}

fn is_identity(a: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(Affine::IDENTITY.as_coeffs())
        .all(|(x, y)| (x - y).abs() < 1e-9)
}

/// Map `src` through `affine` onto a transparent `out_w x out_h` raster.
///
/// Drawn with `tiny_skia` using bilinear filtering; the premultiplied conversion happens at the
/// boundary. Pixels not covered by the mapped source stay transparent.
pub fn warp(src: &Raster, affine: Affine, out_w: u32, out_h: u32) -> ReelResult<Raster> {
    if is_identity(affine) && src.width == out_w && src.height == out_h {
        return Ok(src.clone());
    }
    if affine.determinant().abs() < 1e-12 {
        return Raster::new(out_w, out_h);
    }

    let mut out = tiny_skia::Pixmap::new(out_w, out_h)
        .ok_or_else(|| ReelError::render("failed to allocate warp target"))?;
    let layer = src.to_pixmap()?;
    let paint = tiny_skia::PixmapPaint {
        quality: tiny_skia::FilterQuality::Bilinear,
        ..Default::default()
    };
    out.draw_pixmap(0, 0, layer.as_ref(), &paint, affine_to_skia(affine), None);
    Raster::from_pixmap(&out)
}

fn affine_to_skia(a: Affine) -> tiny_skia::Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs().map(|v| v as f32);
    tiny_skia::Transform::from_row(sx, ky, kx, sy, tx, ty)
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;
