//! # Logo Slot
//!
//! Builds the square logo tile and composites it into its reserved slot.
//!
//! ```text
//!  ╭────────────╮   rounded border, dark fill
//!  │ ┌────────┐ │
//!  │ │ pixel- │ │   source: center crop → smooth downscale to ~half
//!  │ │ ated   │ │           → nearest upscale back to the inner size
//!  │ └────────┘ │   no source: sparse diagonal stub pattern
//!  ╰────────────╯
//! ```
//!
//! The tile is always exactly `S×S`, whatever the source's size or aspect.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use super::canvas::Canvas;
use crate::config::{LogoSlot, Palette};

/// Whether `(x, y)` falls inside an `size×size` square with rounded corners.
fn inside_rounded(x: i64, y: i64, size: i64, radius: i64) -> bool {
    if x < 0 || y < 0 || x >= size || y >= size {
        return false;
    }
    let far = size - 1 - radius;
    let dx = if x < radius { radius - x } else if x > far { x - far } else { 0 };
    let dy = if y < radius { radius - y } else if y > far { y - far } else { 0 };
    dx * dx + dy * dy <= radius * radius
}

/// Shrink with a smoothing filter, then blow back up with nearest-neighbor.
///
/// The result is `inner×inner` made of roughly 2×2 flat cells.
pub fn pixelate(source: &DynamicImage, inner: u32) -> RgbaImage {
    let inner = inner.max(1);
    let side = source.width().min(source.height()).max(1);
    let square = source.crop_imm(
        source.width().saturating_sub(side) / 2,
        source.height().saturating_sub(side) / 2,
        side,
        side,
    );
    let small = (inner / 2).max(1);
    let shrunk = square.resize_exact(small, small, FilterType::Triangle).to_rgba8();
    imageops::resize(&shrunk, inner, inner, FilterType::Nearest)
}

/// Render the `S×S` logo tile. Pixels outside the rounded corners stay transparent.
pub fn tile(source: Option<&DynamicImage>, slot: &LogoSlot, palette: &Palette) -> RgbaImage {
    let size = slot.size;
    let s = size as i64;
    let r = slot.corner_radius.min(size / 2) as i64;
    let mut tile = RgbaImage::new(size, size);

    for y in 0..s {
        for x in 0..s {
            if !inside_rounded(x, y, s, r) {
                continue;
            }
            let edge = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                .iter()
                .any(|&(nx, ny)| !inside_rounded(nx, ny, s, r));
            let color = if edge { palette.logo_border } else { palette.logo_bg };
            tile.put_pixel(x as u32, y as u32, color);
        }
    }

    let pad = slot.padding.min(size / 2);
    let inner = size - 2 * pad;
    match source {
        Some(image) if inner > 0 => {
            let cells = pixelate(image, inner);
            imageops::overlay(&mut tile, &cells, pad as i64, pad as i64);
        }
        _ => stub(&mut tile, pad, inner, slot.stub_step.max(1), palette.logo_stub),
    }

    tile
}

/// Shade every `step`th diagonal of the inner area.
fn stub(tile: &mut RgbaImage, pad: u32, inner: u32, step: usize, color: Rgba<u8>) {
    for iy in 0..inner {
        for ix in 0..inner {
            if (ix as usize + iy as usize) % step == 0 {
                tile.put_pixel(pad + ix, pad + iy, color);
            }
        }
    }
}

/// Composite the logo tile into its slot on the canvas.
pub fn composite(
    canvas: &mut Canvas,
    source: Option<&DynamicImage>,
    slot: &LogoSlot,
    palette: &Palette,
) {
    let tile = tile(source, slot, palette);
    imageops::overlay(canvas.image_mut(), &tile, slot.x as i64, slot.y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::render::color::rgb;
    use std::collections::HashSet;

    fn noise(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(40503)) as u8;
            Rgba([v, v.wrapping_mul(3), v ^ 0x5a, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_tile_is_square_for_any_source() {
        let config = RenderConfig::default();
        let slot = config.logo;
        for (w, h) in [(1, 1), (10, 3), (500, 20), (33, 800), (48, 48)] {
            let tile = tile(Some(&noise(w, h)), &slot, &config.palette);
            assert_eq!(tile.dimensions(), (slot.size, slot.size), "source {}x{}", w, h);
        }
        let tile = tile(None, &slot, &config.palette);
        assert_eq!(tile.dimensions(), (slot.size, slot.size));
    }

    #[test]
    fn test_stub_is_never_blank() {
        let config = RenderConfig::default();
        let tile = tile(None, &config.logo, &config.palette);
        let stub_pixels = tile.pixels().filter(|&&p| p == config.palette.logo_stub).count();
        assert!(stub_pixels > 0);
        let pad = config.logo.padding;
        assert_eq!(*tile.get_pixel(pad, pad), config.palette.logo_stub);
        assert_eq!(*tile.get_pixel(pad + 1, pad), config.palette.logo_bg);
    }

    #[test]
    fn test_rounded_corners_and_border() {
        let config = RenderConfig::default();
        let tile = tile(None, &config.logo, &config.palette);
        let last = config.logo.size - 1;
        assert_eq!(tile.get_pixel(0, 0)[3], 0);
        assert_eq!(tile.get_pixel(last, last)[3], 0);
        assert_eq!(*tile.get_pixel(last / 2, 0), config.palette.logo_border);
        assert_eq!(*tile.get_pixel(0, last / 2), config.palette.logo_border);
        assert_eq!(*tile.get_pixel(1, 1), config.palette.logo_border);
    }

    #[test]
    fn test_pixelate_reduces_detail() {
        let cells = pixelate(&noise(200, 120), 42);
        assert_eq!(cells.dimensions(), (42, 42));
        let distinct: HashSet<[u8; 4]> = cells.pixels().map(|p| p.0).collect();
        assert!(distinct.len() <= 21 * 21);
    }

    #[test]
    fn test_source_replaces_stub() {
        let config = RenderConfig::default();
        let solid = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, rgb(10, 200, 30)));
        let tile = tile(Some(&solid), &config.logo, &config.palette);
        let c = config.logo.size / 2;
        let px = tile.get_pixel(c, c);
        for (got, want) in px.0.iter().zip([10u8, 200, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", px);
        }
        assert!(tile.pixels().all(|&p| p != config.palette.logo_stub));
    }

    #[test]
    fn test_composite_into_slot() {
        let config = RenderConfig::default();
        let mut canvas = Canvas::new(config.base_width, config.base_height);
        for y in 0..canvas.height() {
            canvas.fill_span(y, 0..canvas.width(), rgb(1, 2, 3));
        }
        composite(&mut canvas, None, &config.logo, &config.palette);

        let slot = config.logo;
        // Transparent corner keeps the background
        assert_eq!(canvas.get(slot.x as usize, slot.y as usize), rgb(1, 2, 3));
        assert_eq!(
            canvas.get((slot.x + slot.size / 2) as usize, slot.y as usize),
            config.palette.logo_border
        );
        assert_eq!(canvas.get(0, 0), rgb(1, 2, 3));
    }
}
