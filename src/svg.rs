//! # Vector Card Variant
//!
//! A fixed SVG template: bordered transparent card, 96px logo box (embedded
//! image or a ring-and-bar stub), title, optional subtitle, up to two wrapped
//! description lines, and a meta line. Colors follow the viewer's light/dark
//! preference.

use crate::metadata::{RepoMetadata, push_date};

/// Default SVG card size.
pub const DEFAULT_WIDTH: u32 = 1100;
pub const DEFAULT_HEIGHT: u32 = 170;

const PAD: u32 = 18;
const LOGO: u32 = 96;
const GAP: u32 = 18;
const DESC_CHARS: usize = 74;
const DESC_LINES: usize = 2;

/// Everything the template needs for one card.
#[derive(Debug, Clone, Default)]
pub struct SvgCard<'a> {
    pub width: u32,
    pub height: u32,
    pub name: &'a str,
    pub subtitle: &'a str,
    pub description: &'a str,
    pub metadata: Option<&'a RepoMetadata>,
    pub href: &'a str,
    pub logo_data_uri: Option<&'a str>,
}

/// Escape text for XML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Greedy word wrap into at most `max_lines` lines of `max_chars`.
///
/// When words are left over, the last line is cut to `max_chars - 1` and
/// ends in an ellipsis.
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in &words {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            if lines.len() >= max_lines {
                break;
            }
        }
    }
    if lines.len() < max_lines && !current.is_empty() {
        lines.push(current);
    }

    let full_len = words.join(" ").chars().count();
    let shown_len = lines.join(" ").chars().count();
    if lines.len() == max_lines && full_len > shown_len {
        if let Some(last) = lines.last_mut() {
            let cut: String = last.chars().take(max_chars.saturating_sub(1)).collect();
            *last = format!("{}…", cut.trim_end());
        }
    }
    lines.truncate(max_lines);
    lines
}

/// Meta segments for the vector card: `language · ★ n · ⑂ n · Updated <date>`.
pub fn meta_text(meta: &RepoMetadata) -> String {
    let mut bits = Vec::new();
    if !meta.language.is_empty() {
        bits.push(meta.language.clone());
    }
    if meta.stars > 0 || meta.forks > 0 {
        bits.push(format!("★ {}", meta.stars));
        bits.push(format!("⑂ {}", meta.forks));
    }
    let date = push_date(&meta.pushed_at);
    if !date.is_empty() {
        bits.push(format!("Updated {}", date));
    }
    bits.join(" · ")
}

const STYLE: &str = r#"  <style>
    :root {
      --bg: transparent;
      --border: #d0d7de;
      --title: #0366d6;
      --muted: #57606a;
      --ring: #afb8c1;
      --mark: #57606a;
    }
    @media (prefers-color-scheme: dark) {
      :root {
        --bg: transparent;
        --border: #30363d;
        --title: #0366d6;
        --muted: #8b949e;
        --ring: #30363d;
        --mark: #8b949e;
      }
    }
    .card { fill: var(--bg); stroke: var(--border); stroke-width: 2; }
    .title { fill: var(--title); font: 700 42px -apple-system,BlinkMacSystemFont,Segoe UI,Helvetica,Arial,sans-serif; }
    .subtitle { fill: var(--muted); font: 400 32px -apple-system,BlinkMacSystemFont,Segoe UI,Helvetica,Arial,sans-serif; }
    .desc { fill: var(--muted); font: 400 31px ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial; }
    .meta { fill: var(--muted); font: 400 30px ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial; }
    .logoBg { fill: transparent; }
    .logoStroke { fill: none; stroke: transparent; }
    .logoRing { fill: none; stroke: var(--ring); stroke-width: 2; }
    .logoMark { fill: var(--mark); opacity: 0.9; }
  </style>
"#;

impl SvgCard<'_> {
    fn logo_block(&self) -> String {
        let logo_y = self.height.saturating_sub(LOGO) / 2;
        let frame = format!(
            r#"<rect x="{PAD}" y="{logo_y}" width="{LOGO}" height="{LOGO}" rx="2""#
        );
        let body = match self.logo_data_uri {
            Some(uri) => format!(
                concat!(
                    "    <clipPath id=\"clip\">\n",
                    "      {frame}/>\n",
                    "    </clipPath>\n",
                    "    <image href=\"{uri}\" x=\"{x}\" y=\"{y}\" width=\"{s}\" height=\"{s}\" ",
                    "clip-path=\"url(#clip)\" preserveAspectRatio=\"xMidYMid slice\"/>\n"
                ),
                frame = frame,
                uri = escape(uri),
                x = PAD,
                y = logo_y,
                s = LOGO,
            ),
            None => {
                let cx = PAD + LOGO / 2;
                let cy = self.height / 2;
                format!(
                    concat!(
                        "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"26\" class=\"logoRing\"/>\n",
                        "    <path d=\"M{mx},{my} h36 v12 h-36 z\" class=\"logoMark\"/>\n"
                    ),
                    cx = cx,
                    cy = cy,
                    mx = cx as i64 - 18,
                    my = cy as i64 - 6,
                )
            }
        };
        format!(
            "  <g>\n    {frame} class=\"logoBg\"/>\n{body}    {frame} class=\"logoStroke\"/>\n  </g>\n"
        )
    }

    /// Render the complete SVG document.
    pub fn render(&self) -> String {
        let x_text = PAD + LOGO + GAP;
        let (title_y, sub_y, desc_y1, desc_y2, meta_y) = (76, 122, 102, 120, 144);

        let mut texts = format!(
            "  <text x=\"{x_text}\" y=\"{title_y}\" class=\"title\">{}</text>\n",
            escape(self.name)
        );
        let subtitle = self.subtitle.trim();
        if !subtitle.is_empty() {
            texts.push_str(&format!(
                "  <text x=\"{x_text}\" y=\"{sub_y}\" class=\"subtitle\">{}</text>\n",
                escape(subtitle)
            ));
        }
        let description = wrap(self.description, DESC_CHARS, DESC_LINES);
        for (line, y) in description.iter().zip([desc_y1, desc_y2]) {
            texts.push_str(&format!(
                "  <text x=\"{x_text}\" y=\"{y}\" class=\"desc\">{}</text>\n",
                escape(line)
            ));
        }
        let meta = self.metadata.map(meta_text).unwrap_or_default();
        if !meta.is_empty() {
            texts.push_str(&format!(
                "  <text x=\"{x_text}\" y=\"{meta_y}\" class=\"meta\">{}</text>\n",
                escape(&meta)
            ));
        }

        let (link_start, link_end) = if self.href.is_empty() {
            (String::new(), "")
        } else {
            (
                format!(
                    "  <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">\n",
                    escape(self.href)
                ),
                "  </a>\n",
            )
        };

        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" ",
                "viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{label}\">\n",
                "{style}",
                "{link_start}",
                "  <rect x=\"1\" y=\"1\" width=\"{iw}\" height=\"{ih}\" rx=\"0\" class=\"card\"/>\n",
                "{logo}",
                "{texts}",
                "{link_end}",
                "</svg>\n"
            ),
            w = self.width,
            h = self.height,
            label = escape(self.name),
            style = STYLE,
            link_start = link_start,
            iw = self.width.saturating_sub(2),
            ih = self.height.saturating_sub(2),
            logo = self.logo_block(),
            texts = texts,
            link_end = link_end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#x27;");
    }

    #[test]
    fn test_wrap_fits() {
        assert_eq!(wrap("one two three", 20, 2), vec!["one two three"]);
        assert!(wrap("   ", 20, 2).is_empty());
    }

    #[test]
    fn test_wrap_two_lines() {
        assert_eq!(wrap("aaa bbb ccc", 7, 2), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_overflow_gets_ellipsis() {
        let lines = wrap("aaa bbb ccc ddd eee", 7, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "aaa bbb");
        assert_eq!(lines[1], "ccc dd…");
    }

    #[test]
    fn test_meta_text() {
        let meta = RepoMetadata {
            language: "Go".into(),
            stars: 5,
            forks: 2,
            pushed_at: "2024-01-02T00:00:00Z".into(),
            ..Default::default()
        };
        assert_eq!(meta_text(&meta), "Go · ★ 5 · ⑂ 2 · Updated 2024-01-02");
        assert_eq!(meta_text(&RepoMetadata::default()), "");
    }

    #[test]
    fn test_render_with_stub_logo() {
        let card = SvgCard {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            name: "demo <x>",
            subtitle: "",
            description: "does things",
            metadata: None,
            href: "https://github.com/me/demo",
            logo_data_uri: None,
        };
        let svg = card.render();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1100\" height=\"170\""));
        assert!(svg.contains("aria-label=\"demo &lt;x&gt;\""));
        assert!(svg.contains("class=\"logoRing\""));
        assert!(svg.contains("<a href=\"https://github.com/me/demo\""));
        assert!(svg.contains(">does things</text>"));
        assert!(!svg.contains("class=\"subtitle\">"));
        assert!(!svg.contains("class=\"meta\">"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_with_embedded_logo() {
        let meta = RepoMetadata {
            language: "Rust".into(),
            ..Default::default()
        };
        let card = SvgCard {
            width: 600,
            height: 170,
            name: "demo",
            subtitle: "tiny",
            metadata: Some(&meta),
            logo_data_uri: Some("data:image/png;base64,aGk="),
            ..Default::default()
        };
        let svg = card.render();
        assert!(svg.contains("<image href=\"data:image/png;base64,aGk=\""));
        assert!(svg.contains("clip-path=\"url(#clip)\""));
        assert!(svg.contains("class=\"subtitle\">tiny</text>"));
        assert!(svg.contains("class=\"meta\">Rust</text>"));
        assert!(!svg.contains("<a href"));
        assert!(svg.contains("width=\"598\" height=\"168\""));
    }
}
