//! Rasters drawn from scratch: audio waveforms, text cards and error placeholders.
//!
//! Everything is emitted as a small SVG document and rasterized with `resvg`, sharing one font
//! database for the whole process.

use std::{
    fmt::Write as _,
    sync::{Arc, OnceLock},
};

use crate::foundation::{
    core::{Canvas, Raster},
    error::{ReelError, ReelResult},
};

const PLACEHOLDER_GRAY: u8 = 50;
const PLACEHOLDER_INK: &str = "rgb(200,200,200)";
const WAVE_INK: &str = "rgb(100,255,100)";
const WAVE_STEP_PX: usize = 4;

fn fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.faces().count(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Rasterize an SVG document into a straight-alpha raster of exactly `canvas` size.
pub fn rasterize_svg(svg: &str, canvas: Canvas) -> ReelResult<Raster> {
    let opts = usvg::Options {
        fontdb: fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| ReelError::render(format!("parse svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ReelError::render("failed to allocate svg pixmap"))?;
    let sx = canvas.width as f32 / tree.size().width();
    let sy = canvas.height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Raster::from_pixmap(&pixmap)
}

fn svg_open(canvas: Canvas) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    )
}

/// Centered block of text lines, one `<text>` element per line.
fn push_text_block(svg: &mut String, canvas: Canvas, lines: &[&str], font_px: f64, fill: &str) {
    let line_h = font_px * 1.25;
    let total = line_h * lines.len() as f64;
    let top = (f64::from(canvas.height) - total) / 2.0;
    let cx = f64::from(canvas.width) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let baseline = top + line_h * i as f64 + font_px;
        let _ = write!(
            svg,
            r#"<text x="{cx:.1}" y="{baseline:.1}" font-family="sans-serif" font-size="{font_px:.1}" text-anchor="middle" fill="{fill}">{}</text>"#,
            escape_xml(line)
        );
    }
}

fn font_px_for(canvas: Canvas, divisor: f64) -> f64 {
    (f64::from(canvas.height) / divisor).max(8.0)
}

/// Dark gray frame with a centered (possibly multi-line) message.
pub fn placeholder(canvas: Canvas, message: &str) -> ReelResult<Raster> {
    let mut svg = svg_open(canvas);
    let g = PLACEHOLDER_GRAY;
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="rgb({g},{g},{g})"/>"#
    );
    let lines: Vec<&str> = message.lines().collect();
    push_text_block(&mut svg, canvas, &lines, font_px_for(canvas, 24.0), PLACEHOLDER_INK);
    svg.push_str("</svg>");

    match rasterize_svg(&svg, canvas) {
        Ok(r) => Ok(r),
        Err(err) => {
            tracing::warn!(error = %err, "placeholder text failed; using a plain fill");
            Raster::filled(canvas.width, canvas.height, [g, g, g, 255])
        }
    }
}

/// Waveform offset (in units of a quarter of the frame height) at column `x` for `frame`.
pub fn wave_sample(x: usize, frame: u64) -> f64 {
    let t = (x as f64 + frame as f64 * 10.0) * 0.01;
    t.sin() * 0.3 + (t * 2.5).sin() * 0.2 + (t * 0.7).sin() * 0.1
}

/// Synthetic audio visualization: dark vertical gradient, scrolling waveform and a label.
pub fn audio_waveform(canvas: Canvas, frame: u64, label: &str) -> ReelResult<Raster> {
    let (w, h) = (canvas.width as usize, canvas.height as usize);
    let center = (h / 2) as f64;
    let amplitude = (h / 4) as f64;

    let mut svg = svg_open(canvas);
    svg.push_str(
        r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="rgb(30,24,20)"/><stop offset="1" stop-color="rgb(60,48,40)"/></linearGradient></defs><rect width="100%" height="100%" fill="url(#bg)"/>"#,
    );

    let mut d = String::new();
    for x in (0..w).step_by(WAVE_STEP_PX) {
        let y = center + (wave_sample(x, frame) * amplitude).trunc();
        let _ = write!(d, "M{x} {center}V{y}");
    }
    let _ = write!(
        svg,
        r#"<path d="{d}" stroke="{WAVE_INK}" stroke-width="2" fill="none"/>"#
    );

    let text = format!("AUDIO: {label}");
    push_text_block(&mut svg, canvas, &[&text], font_px_for(canvas, 20.0), "white");
    svg.push_str("</svg>");
    rasterize_svg(&svg, canvas)
}

/// Transparent frame with `text` centered in white.
pub fn text_card(canvas: Canvas, text: &str) -> ReelResult<Raster> {
    let mut svg = svg_open(canvas);
    let lines: Vec<&str> = text.lines().collect();
    push_text_block(&mut svg, canvas, &lines, font_px_for(canvas, 12.0), "white");
    svg.push_str("</svg>");
    rasterize_svg(&svg, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/synth.rs"]
mod tests;
