//! Color helpers for the card palette.
//!
//! Every color is an [`image::Rgba<u8>`]. Blends round to the nearest channel
//! value so the same inputs always land on the same byte.

use image::Rgba;

/// Opaque color from RGB components.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Color with an explicit alpha.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let v = a as f32 + (b as f32 - a as f32) * t;
    v.round().clamp(0.0, 255.0) as u8
}

/// Linear blend of all four channels. `t` is clamped to [0, 1].
pub fn mix(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgba([
        lerp_channel(a[0], b[0], t),
        lerp_channel(a[1], b[1], t),
        lerp_channel(a[2], b[2], t),
        lerp_channel(a[3], b[3], t),
    ])
}

/// Move a color toward white, keeping its alpha.
pub fn lighten(c: Rgba<u8>, amount: f32) -> Rgba<u8> {
    mix(c, Rgba([255, 255, 255, c[3]]), amount)
}

/// Move a color toward black, keeping its alpha.
pub fn darken(c: Rgba<u8>, amount: f32) -> Rgba<u8> {
    mix(c, Rgba([0, 0, 0, c[3]]), amount)
}

/// Sample a piecewise-linear gradient through evenly spaced keyframes.
///
/// `t` = 0 returns the first stop, `t` = 1 the last.
pub fn gradient(stops: &[Rgba<u8>], t: f32) -> Rgba<u8> {
    match stops.len() {
        0 => rgb(0, 0, 0),
        1 => stops[0],
        n => {
            let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (pos.floor() as usize).min(n - 2);
            mix(stops[i], stops[i + 1], pos - i as f32)
        }
    }
}
