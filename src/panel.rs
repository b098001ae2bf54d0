//! # Status Panel
//!
//! A terminal-styled SVG listing a user's most recently pushed repositories.
//!
//! ```text
//! tapawingo@status:~$ cat panel.txt
//! STATUS PANEL  //  2024-01-02 03:04 UTC
//! Latest push: widget  (2024-01-02)
//! Active repos:
//!  - widget                 2024-01-02   Rust
//!  - gadget                 2023-12-30   Go
//! ```
//!
//! Forks and archived repositories are skipped; at most [`MAX_REPOS`] are
//! listed, in the order the API returns them (most recent push first).

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::CardError;
use crate::github::{GithubClient, UserRepo};
use crate::metadata::push_date;
use crate::svg::escape;

/// Repositories listed on the panel.
pub const MAX_REPOS: usize = 6;

/// Default output path.
pub const DEFAULT_OUT: &str = "assets/panel.svg";

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 320;
const TEXT_X: u32 = 56;
const FIRST_LINE_Y: u32 = 92;
const LINE_HEIGHT: u32 = 22;
const NAME_COLUMN: usize = 22;

const HEADER: &str = "#A78BFA";
const HIGHLIGHT: &str = "#E5E7EB";
const MUTED: &str = "#9CA3AF";

const MONO: &str = "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, 'Liberation Mono', 'Courier New', monospace";

/// One colored line of panel text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub text: String,
    pub color: &'static str,
}

impl PanelLine {
    fn new(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Drop forks and archived repositories, keep the first `max`.
pub fn active(repos: Vec<UserRepo>, max: usize) -> Vec<UserRepo> {
    repos
        .into_iter()
        .filter(|r| !r.fork && !r.archived)
        .take(max)
        .collect()
}

fn pushed(repo: &UserRepo) -> String {
    push_date(repo.pushed_at.as_deref().unwrap_or_default())
}

/// Panel text, header first.
pub fn lines(repos: &[UserRepo], now: DateTime<Utc>) -> Vec<PanelLine> {
    let mut lines = vec![PanelLine::new(
        format!("STATUS PANEL  //  {}", now.format("%Y-%m-%d %H:%M UTC")),
        HEADER,
    )];

    let Some(latest) = repos.first() else {
        lines.push(PanelLine::new("No public repos found.", HIGHLIGHT));
        return lines;
    };

    lines.push(PanelLine::new(
        format!("Latest push: {}  ({})", latest.name, pushed(latest)),
        HIGHLIGHT,
    ));
    lines.push(PanelLine::new("Active repos:", MUTED));
    for repo in repos {
        let text = format!(
            " - {:<width$} {}   {}",
            repo.name,
            pushed(repo),
            repo.language.as_deref().unwrap_or_default(),
            width = NAME_COLUMN
        );
        lines.push(PanelLine::new(text, MUTED));
    }
    lines
}

/// Render the panel document.
pub fn render(user: &str, lines: &[PanelLine]) -> String {
    let texts: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"18\">{}</text>",
                TEXT_X,
                FIRST_LINE_Y + i as u32 * LINE_HEIGHT,
                line.color,
                escape(&line.text)
            )
        })
        .collect();

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#070A12"/>
      <stop offset="1" stop-color="#0B1020"/>
    </linearGradient>
    <linearGradient id="accent" x1="0" y1="0" x2="1" y2="0">
      <stop offset="0" stop-color="#7C3AED"/>
      <stop offset="1" stop-color="#22D3EE"/>
    </linearGradient>
    <pattern id="scan" width="6" height="6" patternUnits="userSpaceOnUse">
      <path d="M0 0H6" stroke="white" stroke-opacity="0.05"/>
    </pattern>
  </defs>

  <rect width="{w}" height="{h}" rx="22" fill="url(#bg)"/>
  <rect width="{w}" height="{h}" rx="22" fill="url(#scan)" opacity="0.45"/>
  <circle cx="1060" cy="60" r="170" fill="url(#accent)" opacity="0.12"/>

  <text x="{x}" y="56" fill="#B8C0FF" font-size="16" font-family="{mono}">
    {prompt}@status:~$ cat panel.txt
  </text>

  <g font-family="{mono}">
    {texts}
  </g>
</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        x = TEXT_X,
        mono = MONO,
        prompt = escape(&user.to_lowercase()),
        texts = texts,
    )
}

/// Fetch `user`'s repositories and write the panel to `out`.
pub async fn build(
    client: &GithubClient,
    user: &str,
    out: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, CardError> {
    let repos = active(client.user_repos(user).await?, MAX_REPOS);
    log::debug!("panel for {} lists {} repos", user, repos.len());
    let svg = render(user, &lines(&repos, now));

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, svg)?;
    Ok(out.to_path_buf())
}
