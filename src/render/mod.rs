//! # Rendering Module
//!
//! The raster card pipeline. Every stage works at base resolution on one
//! exclusively owned [`Canvas`]; only the last stage changes resolution.
//!
//! ```text
//! background ─▶ logo slot ─▶ text overlay ─▶ alpha threshold ─▶ upscale
//! ```
//!
//! ## Modules
//!
//! - [`dither`]: Bayer 4x4 two-color picker
//! - [`ridge`]: terrain silhouettes from summed sines
//! - [`background`]: dusk scene (sky, clouds, sun, mountains, lake, foreground)
//! - [`logo`]: pixelated logo tile
//! - [`font`] / [`text`]: glyph rasterization and the card lines
//! - [`finish`]: alpha binarization and nearest-neighbor upscale
//!
//! ## Usage Example
//!
//! ```
//! use repocard::config::RenderConfig;
//! use repocard::render::{self, font::Font, text::CardLines};
//!
//! let config = RenderConfig::default();
//! let lines = CardLines {
//!     title: "DEMO".into(),
//!     ..Default::default()
//! };
//! let image = render::render_card(&config, &lines, None, &Font::Bitmap, 100);
//! assert_eq!(image.dimensions(), (1200, 260));
//! ```

pub mod background;
pub mod canvas;
pub mod color;
pub mod dither;
pub mod finish;
pub mod font;
pub mod logo;
pub mod ridge;
pub mod text;

pub use canvas::Canvas;

use image::{DynamicImage, RgbaImage};

use crate::config::RenderConfig;
use font::Font;
use text::CardLines;

/// Render the composed canvas at base resolution (before thresholding).
pub fn compose(
    config: &RenderConfig,
    lines: &CardLines,
    logo: Option<&DynamicImage>,
    font: &Font,
    seed: u64,
) -> Canvas {
    let mut canvas = background::render(config, seed);
    logo::composite(&mut canvas, logo, &config.logo, &config.palette);
    text::draw(&mut canvas, font, lines, config);
    canvas
}

/// Render one card to its final resolution.
///
/// The output depends only on the arguments: the same inputs give
/// byte-identical images.
pub fn render_card(
    config: &RenderConfig,
    lines: &CardLines,
    logo: Option<&DynamicImage>,
    font: &Font,
    seed: u64,
) -> RgbaImage {
    let mut canvas = compose(config, lines, logo, font, seed);
    finish::threshold_alpha(&mut canvas, config.alpha_cutoff);
    log::debug!("card {:?} rendered with seed {}", lines.title, seed);
    finish::upscale(&canvas, config.scale)
}
