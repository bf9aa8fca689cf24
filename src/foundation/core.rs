use resvg::tiny_skia;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Centre point in pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Opaque RGB background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque RGBA8 pixel.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Straight-alpha RGBA8 raster, row-major, tightly packed.
///
/// Every image flowing through the core (frame source output, effect input/output, layers and
/// the final frame) uses this representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Raster {
    /// Allocate a fully transparent raster.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Allocate a raster where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> ReelResult<Self> {
        let len = byte_len(width, height)?;
        let data = rgba.repeat(len / 4);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing RGBA8 bytes, validating their length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(ReelError::validation(format!(
                "raster expects {len} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` crate buffer.
    pub fn from_image(img: image::RgbaImage) -> ReelResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    /// Convert into an `image` crate buffer (used for resizing and encoding).
    pub fn to_image(&self) -> ReelResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ReelError::render("raster buffer does not match its dimensions"))
    }

    /// Premultiplied `tiny_skia` copy, for drawing with the raster backend.
    pub fn to_pixmap(&self) -> ReelResult<tiny_skia::Pixmap> {
        let mut pixmap = tiny_skia::Pixmap::new(self.width, self.height)
            .ok_or_else(|| ReelError::render("failed to allocate pixmap"))?;
        for (dst, px) in pixmap.pixels_mut().iter_mut().zip(self.data.chunks_exact(4)) {
            *dst = tiny_skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        }
        Ok(pixmap)
    }

    /// Straight-alpha copy of a premultiplied `tiny_skia` pixmap.
    pub fn from_pixmap(pixmap: &tiny_skia::Pixmap) -> ReelResult<Self> {
        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self::from_rgba8(pixmap.width(), pixmap.height(), data)
    }

    /// Canvas describing this raster's size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Return `true` when both rasters have identical dimensions.
    pub fn same_size(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read one pixel. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write one pixel. Panics when out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Resample to exactly `width x height` with a Lanczos3 filter.
    pub fn resized(&self, width: u32, height: u32) -> ReelResult<Raster> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        byte_len(width, height)?;
        let img = self.to_image()?;
        let out = image::imageops::resize(&img, width, height, image::imageops::FilterType::Lanczos3);
        Raster::from_image(out)
    }

    /// Scale to fit inside `bounds` preserving aspect ratio (letterbox fit, no padding added).
    pub fn fit_within(&self, bounds: Canvas) -> ReelResult<Raster> {
        let sx = f64::from(bounds.width) / f64::from(self.width);
        let sy = f64::from(bounds.height) / f64::from(self.height);
        let s = sx.min(sy);
        let w = ((f64::from(self.width) * s) as u32).max(1);
        let h = ((f64::from(self.height) * s) as u32).max(1);
        self.resized(w, h)
    }
}

fn byte_len(width: u32, height: u32) -> ReelResult<usize> {
    if width == 0 || height == 0 {
        return Err(ReelError::validation("raster width/height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ReelError::validation("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
