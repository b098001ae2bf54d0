//! # Ridge Silhouettes
//!
//! A ridge is one terrain layer described as a per-column top edge.
//!
//! ## Formula
//!
//! ```text
//! n     = sin(x * freq1 + phase) + 0.5 * sin(x * freq2 + 1.6 * phase)
//! top_y = base_y - amplitude * (0.55 + 0.45 * n)
//! ```
//!
//! `top_y` is rounded and clamped to `[0, height - 1]`.

/// Parameters for one ridge layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeParams {
    /// Row the silhouette hangs from (usually the horizon).
    pub base_y: f32,
    /// Peak height in pixels.
    pub amplitude: f32,
    /// Primary sine frequency (radians per column).
    pub freq1: f32,
    /// Secondary sine frequency (radians per column).
    pub freq2: f32,
    /// Phase offset, usually drawn from the card's seeded generator.
    pub phase: f32,
}

/// Compute the top edge of a ridge for every column.
///
/// The result has exactly `width` entries, each in `[0, height - 1]`.
pub fn ridge(width: usize, height: usize, params: &RidgeParams) -> Vec<usize> {
    let max_y = height.saturating_sub(1) as f32;
    (0..width)
        .map(|x| {
            let xf = x as f32;
            let n = (xf * params.freq1 + params.phase).sin()
                + 0.5 * (xf * params.freq2 + 1.6 * params.phase).sin();
            let top = params.base_y - params.amplitude * (0.55 + 0.45 * n);
            top.round().clamp(0.0, max_y) as usize
        })
        .collect()
}
