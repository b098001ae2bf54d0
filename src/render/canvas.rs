//! Base-resolution RGBA canvas.
//!
//! A single flat buffer owned by one render call. Passes write whole spans at
//! a time where they can; per-pixel helpers exist for the passes whose color
//! depends on position (dithering, glyph ink).

use image::{Rgba, RgbaImage};
use std::ops::Range;

/// RGBA grid at base (pre-upscale) resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Pixel at `(x, y)`. Panics when out of bounds, like indexing a slice.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba<u8> {
        *self.image.get_pixel(x as u32, y as u32)
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Rgba<u8>) {
        self.image.put_pixel(x as u32, y as u32, color);
    }

    /// Row `y` as a slice of RGBA quads.
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width() * 4;
        let start = y * stride;
        let buf: &mut [u8] = &mut self.image;
        &mut buf[start..start + stride]
    }

    /// Fill columns `xs` of row `y` with a flat color. Clipped to the canvas.
    pub fn fill_span(&mut self, y: usize, xs: Range<usize>, color: Rgba<u8>) {
        if y >= self.height() {
            return;
        }
        let end = xs.end.min(self.width());
        if xs.start >= end {
            return;
        }
        let row = self.row_mut(y);
        for px in row[xs.start * 4..end * 4].chunks_exact_mut(4) {
            px.copy_from_slice(&color.0);
        }
    }

    /// Rewrite columns `xs` of row `y` through `f(x, current)`. Clipped to the canvas.
    pub fn map_span<F>(&mut self, y: usize, xs: Range<usize>, mut f: F)
    where
        F: FnMut(usize, Rgba<u8>) -> Rgba<u8>,
    {
        if y >= self.height() {
            return;
        }
        let end = xs.end.min(self.width());
        if xs.start >= end {
            return;
        }
        let start = xs.start;
        let row = self.row_mut(y);
        for (i, px) in row[start * 4..end * 4].chunks_exact_mut(4).enumerate() {
            let current = Rgba([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&f(start + i, current).0);
        }
    }

    /// Paste `ink` through a coverage mask value.
    ///
    /// Every channel, alpha included, moves from the current pixel toward the
    /// ink by `coverage` (0 = untouched, 1 = replaced). Coordinates outside the
    /// canvas are ignored so glyphs can hang off the edge.
    pub fn paste_ink(&mut self, x: i64, y: i64, ink: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let current = self.get(x, y);
        self.put(x, y, super::color::mix(current, ink, coverage));
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}
