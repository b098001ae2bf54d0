//! # Batch Build
//!
//! Builds every card of a [`FeaturedConfig`] in three phases:
//!
//! ```text
//! fetch (async, sequential)     render (rayon, independent)     write
//! ┌──────────────────────┐      ┌───────────────────────┐      ┌──────────────┐
//! │ metadata + logo bytes│ ───▶ │ card i, seed base + i │ ───▶ │ <slug>.<ext> │
//! │ per card             │      │ own canvas, own rng   │      │ embed snippet│
//! └──────────────────────┘      └───────────────────────┘      └──────────────┘
//! ```
//!
//! The render phase sees only plain values, so artifacts do not depend on
//! the order cards are rendered in.

use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::CardError;
use crate::config::RenderConfig;
use crate::embed::{self, EmbedEntry};
use crate::featured::{CardSpec, FeaturedConfig};
use crate::github::GithubClient;
use crate::logo_source::{LogoBytes, LogoRef};
use crate::metadata::RepoMetadata;
use crate::render::{self, font::Font, text::CardLines};
use crate::svg::{self, SvgCard};

/// Artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Procedural pixel-art raster card.
    #[default]
    Png,
    /// Fixed-template vector card.
    Svg,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Svg => "svg",
        }
    }
}

/// Options for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub config_path: PathBuf,
    pub out_dir: PathBuf,
    /// Overrides the configuration's default user.
    pub user: Option<String>,
    /// Metadata fetch failures abort the build instead of falling back.
    pub strict: bool,
    /// Skip the metadata fetch entirely and use fallbacks.
    pub offline: bool,
    pub format: Format,
    /// Card `i` is rendered with `seed + i`.
    pub seed: u64,
    pub render: RenderConfig,
    pub font: Option<PathBuf>,
    /// Directory relative logo paths resolve against.
    pub root: PathBuf,
    pub svg_width: u32,
    pub svg_height: u32,
    /// Path prefix of image sources in the embed snippet.
    pub embed_prefix: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("featured.json"),
            out_dir: PathBuf::from("assets/cards"),
            user: None,
            strict: false,
            offline: false,
            format: Format::Png,
            seed: 100,
            render: RenderConfig::default(),
            font: None,
            root: PathBuf::from("."),
            svg_width: svg::DEFAULT_WIDTH,
            svg_height: svg::DEFAULT_HEIGHT,
            embed_prefix: "./assets/cards".to_string(),
        }
    }
}

/// A card with every input resolved to plain values.
#[derive(Debug, Clone)]
pub struct PreparedCard {
    pub spec: CardSpec,
    pub owner: String,
    /// Repository name as it resolved (possibly lowercased).
    pub repo: String,
    pub slug: String,
    pub link: String,
    pub metadata: RepoMetadata,
    pub logo: Option<LogoBytes>,
    pub remote_logo: bool,
}

impl PreparedCard {
    /// Prepare a card without any fetching: fallback metadata and no logo.
    pub fn offline(spec: CardSpec, default_user: &str) -> Self {
        let (owner, repo) = spec.owner_repo(default_user);
        let metadata = fallback_metadata(&spec, &repo);
        Self {
            slug: spec.slug(default_user),
            link: spec.link(&owner, &repo),
            owner,
            repo,
            metadata,
            logo: None,
            remote_logo: false,
            spec,
        }
    }

    pub fn alt(&self) -> String {
        format!("{}/{} card", self.owner, self.repo)
    }

    /// Text lines for the raster card.
    pub fn lines(&self, config: &RenderConfig) -> CardLines {
        CardLines::new(&self.spec, &self.metadata, config)
    }
}

/// A rendered card, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Png(RgbaImage),
    Svg(String),
}

impl Artifact {
    /// Write the artifact to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CardError> {
        match self {
            Artifact::Png(image) => image
                .save(path)
                .map_err(|e| CardError::Image(format!("Failed to save {}: {}", path.display(), e))),
            Artifact::Svg(text) => Ok(std::fs::write(path, text)?),
        }
    }
}

/// What a build wrote.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub cards: Vec<PathBuf>,
    pub embed: PathBuf,
}

fn fallback_metadata(spec: &CardSpec, repo: &str) -> RepoMetadata {
    let mut metadata = RepoMetadata::fallback(repo);
    if !spec.title.trim().is_empty() {
        metadata.name = spec.title.trim().to_string();
    }
    metadata.description = spec.description.trim().to_string();
    metadata
}

/// Fetch phase: resolve metadata and logo bytes for every card.
pub async fn prepare(
    featured: &FeaturedConfig,
    options: &BuildOptions,
    client: &GithubClient,
) -> Result<Vec<PreparedCard>, CardError> {
    let user = featured.effective_user(options.user.as_deref());
    let mut prepared = Vec::with_capacity(featured.cards.len());

    for spec in &featured.cards {
        let mut card = PreparedCard::offline(spec.clone(), &user);

        if !options.offline {
            match client.lookup(&card.owner, &card.repo).await {
                Ok(Some(found)) => {
                    if found.repo != card.repo {
                        log::info!("{}/{} resolved as {}", card.owner, card.repo, found.repo);
                        card.link = spec.link(&card.owner, &found.repo);
                        card.repo = found.repo;
                    }
                    card.metadata = found.metadata;
                }
                Ok(None) if options.strict => {
                    return Err(CardError::Fetch(format!(
                        "Repository {}/{} not found",
                        card.owner, card.repo
                    )));
                }
                Ok(None) => {
                    log::warn!("{}/{} not found; using defaults", card.owner, card.repo);
                }
                Err(e) if options.strict => return Err(e),
                Err(e) => {
                    log::warn!("{}; using defaults for {}/{}", e, card.owner, card.repo);
                }
            }
        }

        if let Some(logo) = LogoRef::parse(&spec.logo, &options.root) {
            card.remote_logo = matches!(logo, LogoRef::Remote(_));
            card.logo = logo.fetch(client.http()).await;
        }

        log::debug!("prepared {}", card.slug);
        prepared.push(card);
    }

    Ok(prepared)
}

/// Render one prepared card.
pub fn render_one(
    card: &PreparedCard,
    index: usize,
    options: &BuildOptions,
    font: &Font,
) -> Artifact {
    match options.format {
        Format::Png => {
            let logo = card.logo.as_ref().and_then(LogoBytes::decode);
            let lines = card.lines(&options.render);
            let seed = options.seed.wrapping_add(index as u64);
            Artifact::Png(render::render_card(
                &options.render,
                &lines,
                logo.as_ref(),
                font,
                seed,
            ))
        }
        Format::Svg => {
            let logo_uri = card
                .logo
                .as_ref()
                .and_then(|logo| logo.data_uri(card.remote_logo));
            let name = if card.spec.title.trim().is_empty() {
                card.metadata.name.as_str()
            } else {
                card.spec.title.trim()
            };
            let description = if card.spec.description.trim().is_empty() {
                card.metadata.description.as_str()
            } else {
                card.spec.description.trim()
            };
            Artifact::Svg(
                SvgCard {
                    width: options.svg_width,
                    height: options.svg_height,
                    name,
                    subtitle: &card.spec.subtitle,
                    description,
                    metadata: Some(&card.metadata),
                    href: &card.link,
                    logo_data_uri: logo_uri.as_deref(),
                }
                .render(),
            )
        }
    }
}

/// Render phase: every card in parallel, results in card order.
pub fn render_all(cards: &[PreparedCard], options: &BuildOptions, font: &Font) -> Vec<Artifact> {
    cards
        .par_iter()
        .enumerate()
        .map(|(index, card)| render_one(card, index, options, font))
        .collect()
}

/// Write phase: artifacts plus the embed snippet.
pub fn write_all(
    cards: &[PreparedCard],
    artifacts: &[Artifact],
    options: &BuildOptions,
) -> Result<BuildReport, CardError> {
    std::fs::create_dir_all(&options.out_dir)?;
    let ext = options.format.extension();
    let prefix = options.embed_prefix.trim_end_matches('/');

    let mut written = Vec::with_capacity(cards.len());
    let mut entries = Vec::with_capacity(cards.len());
    for (card, artifact) in cards.iter().zip(artifacts) {
        let file = format!("{}.{}", card.slug, ext);
        let path = options.out_dir.join(&file);
        artifact.save(&path)?;
        entries.push(EmbedEntry {
            href: card.link.clone(),
            src: format!("{}/{}", prefix, file),
            alt: card.alt(),
        });
        written.push(path);
    }

    let embed = embed::write(&options.out_dir, &entries)?;
    Ok(BuildReport {
        cards: written,
        embed,
    })
}

/// Run a complete build.
pub async fn build(options: &BuildOptions) -> Result<BuildReport, CardError> {
    let featured = FeaturedConfig::load(&options.config_path)?;
    let client = GithubClient::from_env()?;
    let cards = prepare(&featured, options, &client).await?;

    let font = Font::load_or_fallback(options.font.as_deref());
    let artifacts = render_all(&cards, options, &font);
    let report = write_all(&cards, &artifacts, options)?;

    log::info!(
        "wrote {} cards and {}",
        report.cards.len(),
        report.embed.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_server::{Route, serve};
    use pretty_assertions::assert_eq;

    fn spec(repo: &str) -> CardSpec {
        CardSpec {
            repo: repo.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_offline_card_uses_fallbacks() {
        let card = PreparedCard::offline(
            CardSpec {
                repo: "acme/widget".into(),
                description: "  Makes widgets ".into(),
                ..Default::default()
            },
            "someone",
        );
        assert_eq!(card.owner, "acme");
        assert_eq!(card.repo, "widget");
        assert_eq!(card.slug, "acme__widget");
        assert_eq!(card.link, "https://github.com/acme/widget");
        assert_eq!(card.metadata.name, "widget");
        assert_eq!(card.metadata.description, "Makes widgets");
        assert_eq!(card.metadata.stars, 0);
        assert_eq!(card.alt(), "acme/widget card");
    }

    #[test]
    fn test_title_override_names_fallback() {
        let card = PreparedCard::offline(
            CardSpec {
                repo: "widget".into(),
                title: "Widget Pro".into(),
                ..Default::default()
            },
            "acme",
        );
        assert_eq!(card.metadata.name, "Widget Pro");
        assert_eq!(card.lines(&RenderConfig::default()).title, "WIDGET PRO");
    }

    #[test]
    fn test_seed_follows_card_index() {
        let options = BuildOptions {
            render: RenderConfig::default().with_scale(1),
            ..Default::default()
        };
        let font = Font::Bitmap;
        let card = PreparedCard::offline(spec("a"), "u");
        let first = render_one(&card, 0, &options, &font);
        let again = render_one(&card, 0, &options, &font);
        let second = render_one(&card, 1, &options, &font);
        assert_eq!(first, again);
        assert_ne!(first, second);
    }

    #[test]
    fn test_parallel_render_matches_sequential() {
        let options = BuildOptions {
            render: RenderConfig::default().with_scale(1),
            ..Default::default()
        };
        let font = Font::Bitmap;
        let cards: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|r| PreparedCard::offline(spec(r), "u"))
            .collect();
        let parallel = render_all(&cards, &options, &font);
        let sequential: Vec<_> = cards
            .iter()
            .enumerate()
            .rev()
            .map(|(i, c)| render_one(c, i, &options, &font))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_svg_artifact() {
        let options = BuildOptions {
            format: Format::Svg,
            ..Default::default()
        };
        let card = PreparedCard::offline(spec("acme/widget"), "u");
        match render_one(&card, 0, &options, &Font::Bitmap) {
            Artifact::Svg(text) => {
                assert!(text.starts_with("<svg"));
                assert!(text.contains("https://github.com/acme/widget"));
            }
            Artifact::Png(_) => panic!("expected svg"),
        }
    }

    #[test]
    fn test_write_all_outputs_cards_and_embed() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            out_dir: dir.path().join("cards"),
            render: RenderConfig::default().with_scale(1),
            ..Default::default()
        };
        let cards: Vec<_> = ["acme/one", "acme/two", "acme/three"]
            .iter()
            .map(|r| PreparedCard::offline(spec(r), "u"))
            .collect();
        let artifacts = render_all(&cards, &options, &Font::Bitmap);
        let report = write_all(&cards, &artifacts, &options).unwrap();

        assert_eq!(report.cards.len(), 3);
        assert!(report.cards[0].ends_with("acme__one.png"));
        let png = image::open(&report.cards[1]).unwrap();
        assert_eq!((png.width(), png.height()), (300, 65));

        let snippet = std::fs::read_to_string(&report.embed).unwrap();
        assert!(snippet.contains("src=\"./assets/cards/acme__three.png\""));
        assert_eq!(snippet.matches("<tr>").count(), 2);
    }

    fn featured(repos: &[&str]) -> FeaturedConfig {
        FeaturedConfig {
            user: "acme".into(),
            cards: repos.iter().map(|r| spec(r)).collect(),
        }
    }

    #[tokio::test]
    async fn test_strict_fetch_failure_aborts() {
        let client = GithubClient::new(None).unwrap().with_base("http://127.0.0.1:1");
        let options = BuildOptions {
            strict: true,
            ..Default::default()
        };
        let result = prepare(&featured(&["widget"]), &options, &client).await;
        assert!(matches!(result, Err(CardError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back() {
        let client = GithubClient::new(None).unwrap().with_base("http://127.0.0.1:1");
        let cards = prepare(&featured(&["widget"]), &BuildOptions::default(), &client)
            .await
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].metadata, RepoMetadata::fallback("widget"));
        assert_eq!(cards[0].link, "https://github.com/acme/widget");
    }

    #[tokio::test]
    async fn test_lowercase_retry_rewrites_link() {
        let base = serve(vec![Route {
            path: "/repos/acme/widget",
            status: 200,
            body: r#"{"name": "widget", "language": "Rust", "stargazers_count": 3}"#,
        }])
        .await;
        let client = GithubClient::new(None).unwrap().with_base(base);
        let cards = prepare(&featured(&["Widget"]), &BuildOptions::default(), &client)
            .await
            .unwrap();
        assert_eq!(cards[0].repo, "widget");
        assert_eq!(cards[0].link, "https://github.com/acme/widget");
        assert_eq!(cards[0].metadata.language, "Rust");
        assert_eq!(cards[0].metadata.stars, 3);
        assert_eq!(cards[0].slug, "acme__Widget");
    }

    #[tokio::test]
    async fn test_not_found_strict_and_lenient() {
        let base = serve(Vec::new()).await;
        let client = GithubClient::new(None).unwrap().with_base(base);

        let strict = BuildOptions {
            strict: true,
            ..Default::default()
        };
        let result = prepare(&featured(&["gone"]), &strict, &client).await;
        assert!(matches!(result, Err(CardError::Fetch(_))));

        let cards = prepare(&featured(&["gone"]), &BuildOptions::default(), &client)
            .await
            .unwrap();
        assert_eq!(cards[0].metadata.name, "gone");
    }

    #[tokio::test]
    async fn test_blank_user_override_keeps_file_user() {
        let client = GithubClient::new(None).unwrap();
        let options = BuildOptions {
            user: Some("  ".into()),
            offline: true,
            ..Default::default()
        };
        let cards = prepare(&featured(&["widget"]), &options, &client).await.unwrap();
        assert_eq!(cards[0].owner, "acme");

        let options = BuildOptions {
            user: Some(" other ".into()),
            offline: true,
            ..Default::default()
        };
        let cards = prepare(&featured(&["widget"]), &options, &client).await.unwrap();
        assert_eq!(cards[0].owner, "other");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(Format::Png.extension(), "png");
        assert_eq!(Format::Svg.extension(), "svg");
    }
}
