//! # Bayer 4x4 Ordered Dithering
//!
//! Pixel art keeps a flat palette: there is no real alpha blending in the
//! visible scene. Wherever a soft transition is wanted (sky texture, cloud
//! streaks, sun halo, lake reflection) each pixel instead picks one of two
//! flat colors according to a fixed threshold matrix.
//!
//! ## The Matrix
//!
//! ```text
//!     0   1   2   3   (x mod 4)
//!   ┌───┬───┬───┬───┐
//! 0 │ 0 │ 8 │ 2 │10 │
//!   ├───┼───┼───┼───┤
//! 1 │12 │ 4 │14 │ 6 │
//!   ├───┼───┼───┼───┤
//! 2 │ 3 │11 │ 1 │ 9 │
//!   ├───┼───┼───┼───┤
//! 3 │15 │ 7 │13 │ 5 │
//!   └───┴───┴───┴───┘
//! (y mod 4)
//! ```
//!
//! Values 0-15 are normalized as `t = value / 15`. A pixel takes the second
//! color when `t < amount`, so raising `amount` switches cells over one level
//! at a time, lowest value first.
//!
//! The comparison is strict and `amount` is clamped to `[0, 1]`, so the
//! sweep never reaches a solid second color: at `amount = 1` the cell holding
//! 15 (`t = 1.0`) still shows the first color, and 15 of every 16 pixels
//! take the second. `amount = 0` is solid first color.
//!
//! ## Usage Example
//!
//! ```
//! use repocard::render::dither::pick;
//! use repocard::render::color::rgb;
//!
//! let navy = rgb(14, 14, 38);
//! let orange = rgb(250, 160, 90);
//!
//! // Level 0 at the origin switches as soon as amount is positive
//! assert_eq!(pick(navy, orange, 0, 0, 0.01), orange);
//! assert_eq!(pick(navy, orange, 0, 0, 0.0), navy);
//! ```

use image::Rgba;

/// Bayer 4x4 dithering matrix, indexed `[y mod 4][x mod 4]`.
pub const BAYER4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Normalized threshold in [0, 1] for a pixel position.
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    BAYER4[y & 3][x & 3] as f32 / 15.0
}

/// Choose between two flat colors at `(x, y)`.
///
/// Returns `b` when the cell's threshold is below `amount` (clamped to
/// [0, 1]), otherwise `a`. Pure: no state, no randomness.
#[inline]
pub fn pick(a: Rgba<u8>, b: Rgba<u8>, x: usize, y: usize, amount: f32) -> Rgba<u8> {
    if threshold(x, y) < amount.clamp(0.0, 1.0) { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::rgb;

    const A: Rgba<u8> = rgb(0, 0, 0);
    const B: Rgba<u8> = rgb(255, 255, 255);

    fn count_b(amount: f32) -> usize {
        let mut n = 0;
        for y in 0..4 {
            for x in 0..4 {
                if pick(A, B, x, y, amount) == B {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_bayer_matrix_values() {
        let mut seen = [false; 16];
        for row in &BAYER4 {
            for &val in row {
                assert!(val < 16, "Matrix value {} out of range", val);
                assert!(!seen[val as usize], "Duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_threshold_periodicity() {
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(threshold(x, y), threshold(x + 4, y));
                assert_eq!(threshold(x, y), threshold(x, y + 4));
                assert_eq!(threshold(x, y), threshold(x + 12, y + 8));
            }
        }
    }

    #[test]
    fn test_zero_amount_always_a() {
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(pick(A, B, x, y, 0.0), A);
                assert_eq!(pick(A, B, x, y, -3.0), A);
            }
        }
    }

    #[test]
    fn test_sweep_is_monotonic() {
        let mut last = 0;
        for step in 0..=150 {
            let amount = step as f32 / 150.0;
            let n = count_b(amount);
            assert!(n >= last, "count dropped at amount {}", amount);
            last = n;
        }
        // The top level (15/15 = 1.0) is never strictly below the clamp ceiling
        assert_eq!(count_b(1.0), 15);
        assert_eq!(count_b(2.0), 15);
    }

    #[test]
    fn test_full_amount_keeps_top_cell() {
        // Level 15 sits at [3][0]
        assert_eq!(pick(A, B, 0, 3, 1.0), A);
        assert_eq!(pick(A, B, 4, 7, 1.0), A);
        assert_eq!(pick(A, B, 1, 3, 1.0), B);
    }

    #[test]
    fn test_each_level_adds_one_cell() {
        for level in 0..15 {
            let just_above = level as f32 / 15.0 + 0.001;
            assert_eq!(count_b(just_above), level + 1);
        }
    }

    #[test]
    fn test_pick_pure_for_fixed_position() {
        for step in 0..20 {
            let amount = step as f32 / 19.0;
            assert_eq!(pick(A, B, 5, 9, amount), pick(A, B, 5, 9, amount));
        }
    }
}
