//! Two-column markup snippet linking every card image.

use std::path::{Path, PathBuf};

use crate::CardError;

/// File name of the generated snippet inside the output directory.
pub const EMBED_FILE: &str = "featured_embed.md";

/// One linked image cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedEntry {
    pub href: String,
    /// Relative path of the card image.
    pub src: String,
    pub alt: String,
}

impl EmbedEntry {
    fn cell(&self) -> String {
        format!(
            "<a href=\"{}\"><img src=\"{}\" width=\"100%\" alt=\"{}\" /></a>",
            self.href, self.src, self.alt
        )
    }
}

/// Build the snippet: one table row per pair of cards.
pub fn snippet(entries: &[EmbedEntry]) -> String {
    let rows: Vec<String> = entries
        .chunks(2)
        .map(|pair| {
            let left = pair[0].cell();
            let right = pair.get(1).map(EmbedEntry::cell).unwrap_or_default();
            format!(
                "<tr>\n  <td width=\"50%\">{}</td>\n  <td width=\"50%\">{}</td>\n</tr>",
                left, right
            )
        })
        .collect();
    format!(
        "<!-- generated by repocard -->\n<table>\n{}\n</table>\n",
        rows.join("\n")
    )
}

/// Write the snippet into `out_dir`, returning its path.
pub fn write(out_dir: &Path, entries: &[EmbedEntry]) -> Result<PathBuf, CardError> {
    let path = out_dir.join(EMBED_FILE);
    std::fs::write(&path, snippet(entries))?;
    Ok(path)
}
