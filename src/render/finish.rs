//! Final passes: alpha binarization and nearest-neighbor upscaling.

use image::RgbaImage;

use super::canvas::Canvas;

/// Binarize alpha: strictly above `cutoff` becomes 255, the rest 0.
///
/// RGB channels are left untouched.
pub fn threshold_alpha(canvas: &mut Canvas, cutoff: u8) {
    for px in canvas.image_mut().pixels_mut() {
        px[3] = if px[3] > cutoff { 255 } else { 0 };
    }
}

/// Nearest-neighbor upscale by an integer factor.
///
/// Each source row is expanded once into a row buffer, then copied `scale`
/// times. Identical to per-pixel nearest sampling at integer factors.
pub fn upscale(canvas: &Canvas, scale: u32) -> RgbaImage {
    let scale = scale.max(1) as usize;
    let (width, height) = (canvas.width(), canvas.height());
    let src = canvas.as_raw();
    let out_stride = width * scale * 4;
    let mut out = Vec::with_capacity(out_stride * height * scale);
    let mut row = Vec::with_capacity(out_stride);

    for y in 0..height {
        row.clear();
        for px in src[y * width * 4..(y + 1) * width * 4].chunks_exact(4) {
            for _ in 0..scale {
                row.extend_from_slice(px);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&row);
        }
    }

    RgbaImage::from_raw((width * scale) as u32, (height * scale) as u32, out)
        .unwrap_or_else(|| RgbaImage::new((width * scale) as u32, (height * scale) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::{rgb, rgba};

    #[test]
    fn test_threshold_is_binary() {
        let mut canvas = Canvas::new(256, 1);
        canvas.map_span(0, 0..256, |x, _| rgba(x as u8, 7, 9, x as u8));
        threshold_alpha(&mut canvas, 127);
        for x in 0..256 {
            let px = canvas.get(x, 0);
            assert!(px[3] == 0 || px[3] == 255);
            assert_eq!(px[3] == 255, x > 127);
            assert_eq!((px[0], px[1], px[2]), (x as u8, 7, 9));
        }
    }

    #[test]
    fn test_upscale_dimensions() {
        let canvas = Canvas::new(300, 65);
        let out = upscale(&canvas, 4);
        assert_eq!(out.dimensions(), (1200, 260));
        assert_eq!(upscale(&canvas, 0).dimensions(), (300, 65));
    }

    #[test]
    fn test_upscale_matches_nearest_sampling() {
        let mut canvas = Canvas::new(5, 3);
        for y in 0..3 {
            canvas.map_span(y, 0..5, |x, _| rgb(x as u8 * 40, y as u8 * 80, 7));
        }
        let scale = 3;
        let out = upscale(&canvas, scale);
        for oy in 0..out.height() {
            for ox in 0..out.width() {
                let src = canvas.get((ox / scale) as usize, (oy / scale) as usize);
                assert_eq!(*out.get_pixel(ox, oy), src);
            }
        }
    }
}
