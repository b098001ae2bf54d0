//! Glyph rasterization for the text overlay.
//!
//! A TrueType file is rendered with `ab_glyph` into an anti-aliased coverage
//! buffer. When no font file is given, or it cannot be read or parsed, the
//! built-in Spleen 6x12 bitmap font is used instead. Characters Spleen does
//! not cover are drawn as a box outline.

use ab_glyph::{Font as _, FontArc, ScaleFont};
use spleen_font::{FONT_6X12, PSF2Font};
use std::path::Path;

use crate::CardError;

/// Bitmap fallback cell size.
pub const BITMAP_WIDTH: usize = 6;
pub const BITMAP_HEIGHT: usize = 12;

/// A line of text rasterized to a coverage mask.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub width: usize,
    pub height: usize,
    /// Coverage per pixel: 0.0 = empty, 1.0 = fully inked.
    pub coverage: Vec<f32>,
}

impl GlyphRun {
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.coverage[y * self.width + x]
    }
}

/// Font used for every text line of a card.
#[derive(Clone)]
pub enum Font {
    TrueType(FontArc),
    /// Spleen 6x12 monospace.
    Bitmap,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Font::TrueType(_) => f.write_str("Font::TrueType"),
            Font::Bitmap => f.write_str("Font::Bitmap"),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::Bitmap
    }
}

impl Font {
    /// Load a TrueType/OpenType font file.
    pub fn from_file(path: &Path) -> Result<Self, CardError> {
        let bytes = std::fs::read(path)
            .map_err(|e| CardError::Font(format!("Failed to read {}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| CardError::Font(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(Font::TrueType(font))
    }

    /// Load `path` if given, falling back to the bitmap font on any failure.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        match path {
            None => Font::Bitmap,
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                log::warn!("{}; using built-in bitmap font", e);
                Font::Bitmap
            }),
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Font::Bitmap)
    }

    /// Rasterize one line of text, clipped to `max_width` pixels.
    ///
    /// `pixel_height` only applies to TrueType fonts.
    pub fn rasterize(&self, text: &str, pixel_height: f32, max_width: usize) -> GlyphRun {
        match self {
            Font::TrueType(font) => rasterize_ttf(font, text, pixel_height, max_width),
            Font::Bitmap => rasterize_bitmap(text, max_width),
        }
    }
}

fn rasterize_ttf(font: &FontArc, text: &str, pixel_height: f32, max_width: usize) -> GlyphRun {
    let scaled = font.as_scaled(pixel_height);

    let mut glyphs = Vec::new();
    let mut caret_x = 0.0f32;
    let mut previous = None;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret_x += scaled.kern(prev, glyph_id);
        }
        glyphs.push((glyph_id, caret_x));
        caret_x += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }

    let width = (caret_x.ceil() as usize).min(max_width).max(1);
    let ascent = scaled.ascent();
    let height = ((ascent - scaled.descent()).ceil() as usize).max(1);
    let mut coverage = vec![0.0f32; width * height];

    for &(glyph_id, glyph_x) in &glyphs {
        let position = ab_glyph::point(glyph_x, ascent);
        let glyph = glyph_id.with_scale_and_position(pixel_height, position);
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, c| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let idx = y as usize * width + x as usize;
                    coverage[idx] = (coverage[idx] + c).min(1.0);
                }
            });
        }
    }

    GlyphRun {
        width,
        height,
        coverage,
    }
}

fn rasterize_bitmap(text: &str, max_width: usize) -> GlyphRun {
    let count = text.chars().count();
    let width = (count * BITMAP_WIDTH).min(max_width).max(1);
    let height = BITMAP_HEIGHT;
    let mut coverage = vec![0.0f32; width * height];

    let Ok(mut spleen) = PSF2Font::new(FONT_6X12) else {
        log::warn!("built-in bitmap font unavailable; drawing boxes");
        for i in 0..count {
            draw_box(&mut coverage, width, i * BITMAP_WIDTH);
        }
        return GlyphRun { width, height, coverage };
    };

    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let origin = i * BITMAP_WIDTH;
        if origin >= width {
            break;
        }
        if ch == ' ' {
            continue;
        }
        match spleen.glyph_for_utf8(ch.encode_utf8(&mut buf).as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        let x = origin + col_x;
                        if on && x < width && row_y < height {
                            coverage[row_y * width + x] = 1.0;
                        }
                    }
                }
            }
            None => draw_box(&mut coverage, width, origin),
        }
    }

    GlyphRun {
        width,
        height,
        coverage,
    }
}

/// Box outline for characters the bitmap font lacks.
fn draw_box(coverage: &mut [f32], width: usize, origin: usize) {
    let left = origin + 1;
    let right = origin + BITMAP_WIDTH - 2;
    let (top, bottom) = (2, BITMAP_HEIGHT - 3);
    for x in left..=right.min(width.saturating_sub(1)) {
        coverage[top * width + x] = 1.0;
        coverage[bottom * width + x] = 1.0;
    }
    for y in top..=bottom {
        for x in [left, right] {
            if x < width {
                coverage[y * width + x] = 1.0;
            }
        }
    }
}
