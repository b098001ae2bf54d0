//! # Text Overlay
//!
//! Composes the four card lines and draws them with a one-pixel drop shadow.
//!
//! ```text
//! TITLE                                  uppercased
//! subtitle                               lowercased, skipped when empty
//! a single description line clamped t…   lowercased, ellipsis on overflow
//! go  ·  ★ 5  ·  ⑂ 2  ·  push 2024-01-02 lowercased, empty segments omitted
//! ```
//!
//! Each line is drawn twice: shadow ink offset by (+1, +1), then the
//! foreground at its true position.

use image::Rgba;

use super::canvas::Canvas;
use super::font::Font;
use crate::config::{RenderConfig, TextLine};
use crate::featured::CardSpec;
use crate::metadata::{RepoMetadata, push_date};

/// Ellipsis appended to clamped lines.
pub const ELLIPSIS: char = '…';

/// The text content of one card, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardLines {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub meta: String,
}

impl CardLines {
    /// Compose lines from a card's overrides and its metadata.
    pub fn new(card: &CardSpec, meta: &RepoMetadata, config: &RenderConfig) -> Self {
        let name = non_empty(&card.title).unwrap_or(&meta.name);
        let description = non_empty(&card.description).unwrap_or(&meta.description);
        Self {
            title: title_line(name),
            subtitle: subtitle_line(&card.subtitle),
            description: clamp_chars(&description.to_lowercase(), config.description_budget),
            meta: meta_line(
                &meta.language,
                meta.stars,
                meta.forks,
                &push_date(&meta.pushed_at),
                config.meta_separator,
            ),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s) }
}

/// Collapse all whitespace runs to single spaces.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn title_line(name: &str) -> String {
    single_line(name).to_uppercase()
}

pub fn subtitle_line(subtitle: &str) -> String {
    single_line(subtitle).to_lowercase()
}

/// Clamp to at most `budget` characters, ending in a single ellipsis on overflow.
pub fn clamp_chars(text: &str, budget: usize) -> String {
    let text = single_line(text);
    if text.chars().count() <= budget {
        return text;
    }
    if budget == 0 {
        return String::new();
    }
    let mut clamped: String = text.chars().take(budget - 1).collect();
    clamped.truncate(clamped.trim_end().len());
    clamped.push(ELLIPSIS);
    clamped
}

/// Join the metadata segments with `separator`, lowercased.
///
/// Language and date are omitted when empty. Stars and forks appear together
/// when either is non-zero.
pub fn meta_line(language: &str, stars: u64, forks: u64, date: &str, separator: &str) -> String {
    let mut segments = Vec::new();
    if !language.trim().is_empty() {
        segments.push(language.trim().to_string());
    }
    if stars > 0 || forks > 0 {
        segments.push(format!("★ {}", stars));
        segments.push(format!("⑂ {}", forks));
    }
    if !date.is_empty() {
        segments.push(format!("push {}", date));
    }
    segments.join(separator).to_lowercase()
}

/// Draw every non-empty line onto the canvas.
pub fn draw(canvas: &mut Canvas, font: &Font, lines: &CardLines, config: &RenderConfig) {
    let palette = &config.palette;
    let x = config.text_x;
    let rows = [
        (&lines.title, &config.title, palette.title),
        (&lines.subtitle, &config.subtitle, palette.body),
        (&lines.description, &config.description, palette.body),
        (&lines.meta, &config.meta, palette.body),
    ];
    for (text, line, ink) in rows {
        if !text.is_empty() {
            draw_line(canvas, font, text, x, line, ink, palette.shadow);
        }
    }
}

fn draw_line(
    canvas: &mut Canvas,
    font: &Font,
    text: &str,
    x: i64,
    line: &TextLine,
    ink: Rgba<u8>,
    shadow: Rgba<u8>,
) {
    let max_width = (canvas.width() as i64 - x).max(1) as usize;
    let run = font.rasterize(text, line.pixel_height, max_width);
    for (dx, dy, color) in [(1, 1, shadow), (0, 0, ink)] {
        for gy in 0..run.height {
            for gx in 0..run.width {
                let coverage = run.at(gx, gy);
                if coverage > 0.0 {
                    canvas.paste_ink(x + gx as i64 + dx, line.y + gy as i64 + dy, color, coverage);
                }
            }
        }
    }
}
