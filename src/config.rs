//! # Render Configuration
//!
//! Canvas geometry, layout, and palette shared (read-only) by every card in a
//! batch.
//!
//! ## Layout (base resolution)
//!
//! ```text
//! ├ 8 ┼──── 48 ────┼ 8 ┼──────────── text column ────────────┤
//! ┌──────────────────────────────────────────────────────────┐
//! │   ┌──────────┐   TITLE                                   │
//! │   │   logo   │   subtitle                                │
//! │   │   slot   │   description line…                       │
//! │   └──────────┘   go  ·  ★ 5  ·  ⑂ 2  ·  push 2024-01-02  │
//! └──────────────────────────────────────────────────────────┘
//!                      300 × 65, upscaled ×4 to 1200 × 260
//! ```
//!
//! ## Usage
//!
//! ```
//! use repocard::config::RenderConfig;
//!
//! let config = RenderConfig::default();
//! assert_eq!(config.final_size(), (1200, 260));
//! ```

use crate::render::color::{rgb, rgba};
use image::Rgba;

/// Named palette colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Sky keyframes, top to horizon (purple → pink → orange).
    pub sky: [Rgba<u8>; 3],
    pub cloud: Rgba<u8>,
    pub sun_core: Rgba<u8>,
    /// Outer sun ring and reflection color.
    pub sun_orange: Rgba<u8>,
    pub sun_glow: Rgba<u8>,
    pub mountain_far: Rgba<u8>,
    pub mountain_near: Rgba<u8>,
    /// Darkest keyframe: bottom of the lake and the foreground silhouette.
    pub navy: Rgba<u8>,
    pub logo_bg: Rgba<u8>,
    pub logo_border: Rgba<u8>,
    pub logo_stub: Rgba<u8>,
    pub title: Rgba<u8>,
    pub body: Rgba<u8>,
    /// Drop shadow ink (semi-transparent).
    pub shadow: Rgba<u8>,
}

impl Palette {
    /// Dusk palette used by the raster cards.
    pub const DUSK: Self = Self {
        sky: [rgb(46, 27, 78), rgb(196, 84, 140), rgb(250, 160, 90)],
        cloud: rgb(255, 214, 220),
        sun_core: rgb(255, 236, 170),
        sun_orange: rgb(255, 150, 70),
        sun_glow: rgb(255, 190, 120),
        mountain_far: rgb(104, 56, 118),
        mountain_near: rgb(52, 32, 78),
        navy: rgb(14, 14, 38),
        logo_bg: rgb(26, 18, 48),
        logo_border: rgb(255, 200, 150),
        logo_stub: rgb(120, 88, 160),
        title: rgb(255, 244, 214),
        body: rgb(236, 224, 255),
        shadow: rgba(8, 6, 20, 170),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DUSK
    }
}

/// Reserved square for the logo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSlot {
    pub x: u32,
    pub y: u32,
    /// Side length `S` of the square slot.
    pub size: u32,
    /// Inner padding between the slot border and the pixelated image.
    pub padding: u32,
    pub corner_radius: u32,
    /// Stub pattern shades every `stub_step`th diagonal.
    pub stub_step: usize,
}

/// Position and size of one text line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLine {
    /// Top of the line box.
    pub y: i64,
    /// Pixel height for TrueType fonts (the bitmap fallback has a fixed size).
    pub pixel_height: f32,
}

/// Everything that stays constant for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub base_width: u32,
    pub base_height: u32,
    /// Integer nearest-neighbor upscale factor.
    pub scale: u32,
    /// Horizon row as a fraction of the base height.
    pub horizon: f32,
    pub cloud_count: usize,
    pub logo: LogoSlot,
    /// Left edge of the text column.
    pub text_x: i64,
    pub title: TextLine,
    pub subtitle: TextLine,
    pub description: TextLine,
    pub meta: TextLine,
    /// Maximum characters in the description line, ellipsis included.
    pub description_budget: usize,
    pub meta_separator: &'static str,
    /// Alpha strictly above this becomes opaque, everything else transparent.
    pub alpha_cutoff: u8,
    pub palette: Palette,
}

impl RenderConfig {
    /// Default card: 300×65 base, ×4 upscale.
    pub const STANDARD: Self = Self {
        base_width: 300,
        base_height: 65,
        scale: 4,
        horizon: 0.56,
        cloud_count: 7,
        logo: LogoSlot {
            x: 8,
            y: 8,
            size: 48,
            padding: 3,
            corner_radius: 3,
            stub_step: 5,
        },
        text_x: 64,
        title: TextLine { y: 4, pixel_height: 12.0 },
        subtitle: TextLine { y: 18, pixel_height: 10.0 },
        description: TextLine { y: 31, pixel_height: 10.0 },
        meta: TextLine { y: 45, pixel_height: 9.0 },
        description_budget: 38,
        meta_separator: "  ·  ",
        alpha_cutoff: 127,
        palette: Palette::DUSK,
    };

    /// Override the upscale factor (at least 1).
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Final image size after upscaling.
    pub fn final_size(&self) -> (u32, u32) {
        (self.base_width * self.scale, self.base_height * self.scale)
    }

    /// Horizon row at base resolution.
    pub fn horizon_row(&self) -> usize {
        (self.base_height as f32 * self.horizon).round() as usize
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
