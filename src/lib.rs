//! # Repocard - Procedural Repository Cards
//!
//! Repocard renders small "repository card" images that summarize a project
//! (name, tagline, description, language, star/fork counts, last push date,
//! optional logo) for embedding in a profile README. It provides:
//!
//! - **Pixel-art raster cards**: a seeded dusk landscape with ordered
//!   dithering, a pixelated logo tile, drop-shadowed text, crisp alpha and
//!   a nearest-neighbor upscale
//! - **Vector cards**: a fixed SVG template with light/dark palettes
//! - **Batch builds**: a card list file, GitHub metadata, and a two-column
//!   embed snippet
//! - **Status panel**: a terminal-styled SVG of recently pushed repositories
//!
//! ## Quick Start
//!
//! ```
//! use repocard::{
//!     config::RenderConfig,
//!     featured::CardSpec,
//!     metadata::RepoMetadata,
//!     render::{self, font::Font, text::CardLines},
//! };
//!
//! let config = RenderConfig::default();
//! let card = CardSpec { repo: "demo".into(), ..Default::default() };
//! let meta = RepoMetadata {
//!     name: "demo".into(),
//!     language: "Rust".into(),
//!     stars: 5,
//!     ..Default::default()
//! };
//! let lines = CardLines::new(&card, &meta, &config);
//! let image = render::render_card(&config, &lines, None, &Font::default(), 100);
//! assert_eq!(image.dimensions(), config.final_size());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Raster pipeline: background, logo, text, finish |
//! | [`config`] | Render geometry and palette |
//! | [`featured`] | Card list file and repository resolution |
//! | [`github`] | Metadata lookup |
//! | [`logo_source`] | Local and remote logos |
//! | [`svg`] | Vector card template |
//! | [`embed`] | Markup snippet |
//! | [`panel`] | Status panel |
//! | [`batch`] | End-to-end build |
//! | [`error`] | Error types |

pub mod batch;
pub mod config;
pub mod embed;
pub mod error;
pub mod featured;
pub mod github;
pub mod logo_source;
pub mod metadata;
pub mod panel;
pub mod render;
pub mod svg;

pub use error::CardError;
