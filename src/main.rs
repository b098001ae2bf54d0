//! # Repocard CLI
//!
//! Command-line interface for building repository cards.
//!
//! ## Usage
//!
//! ```bash
//! # Build every card listed in featured.json into assets/cards/
//! repocard build
//!
//! # Vector cards, failing on any repository that cannot be fetched
//! repocard build --format svg --strict
//!
//! # Build without touching the network (fallback metadata)
//! repocard build --offline --font ./fonts/pixel.ttf
//!
//! # Render a single card from flags
//! repocard card --name demo --language rust --stars 5 --out demo.png
//!
//! # Status panel of a user's recently pushed repositories
//! repocard panel --user someone --out assets/panel.svg
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use repocard::{
    CardError,
    batch::{self, BuildOptions, Format, PreparedCard},
    config::RenderConfig,
    featured::{self, CardSpec, DEFAULT_USER},
    github::GithubClient,
    logo_source::LogoRef,
    metadata::RepoMetadata,
    panel,
    render::font::Font,
    svg,
};

/// Repocard - Procedural repository card generator
#[derive(Parser, Debug)]
#[command(name = "repocard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every card in a card list file
    Build {
        /// Card list file
        #[arg(long, default_value = "featured.json")]
        config: PathBuf,

        /// Output directory for cards and the embed snippet
        #[arg(long, default_value = "assets/cards")]
        out_dir: PathBuf,

        /// Default repository owner (overrides the file's "user")
        #[arg(long)]
        user: Option<String>,

        /// Fail when a repository's metadata cannot be fetched
        #[arg(long)]
        strict: bool,

        /// Do not fetch metadata; use card overrides only
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "png")]
        format: Format,

        /// Base seed; card i uses seed + i
        #[arg(long, default_value = "100")]
        seed: u64,

        /// Integer upscale factor for raster cards
        #[arg(long, default_value = "4")]
        scale: u32,

        /// TrueType font for raster text (defaults to a built-in bitmap font)
        #[arg(long, value_name = "TTF")]
        font: Option<PathBuf>,

        /// Directory relative logo paths resolve against
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Vector card width
        #[arg(long, default_value_t = svg::DEFAULT_WIDTH)]
        width: u32,

        /// Vector card height
        #[arg(long, default_value_t = svg::DEFAULT_HEIGHT)]
        height: u32,
    },

    /// Render one card from flags, without metadata lookup
    Card {
        /// Repository name (title)
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        subtitle: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        language: String,

        #[arg(long, default_value = "0")]
        stars: u64,

        #[arg(long, default_value = "0")]
        forks: u64,

        /// Last push timestamp (RFC 3339 or YYYY-MM-DD)
        #[arg(long, default_value = "")]
        pushed: String,

        /// Logo path or URL
        #[arg(long, default_value = "")]
        logo: String,

        #[arg(long, default_value = "100")]
        seed: u64,

        #[arg(long, default_value = "4")]
        scale: u32,

        #[arg(long, value_name = "TTF")]
        font: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "png")]
        format: Format,

        /// Output file
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Write the status panel of a user's most recently pushed repositories
    Panel {
        /// GitHub user
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,

        /// Output file
        #[arg(long, default_value = panel::DEFAULT_OUT)]
        out: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CardError> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Build {
            config,
            out_dir,
            user,
            strict,
            offline,
            format,
            seed,
            scale,
            font,
            root,
            width,
            height,
        } => {
            let options = BuildOptions {
                config_path: config,
                out_dir,
                user,
                strict,
                offline,
                format,
                seed,
                render: RenderConfig::default().with_scale(scale),
                font,
                root,
                svg_width: width,
                svg_height: height,
                ..Default::default()
            };
            println!("Building cards from {}...", options.config_path.display());
            let report = runtime.block_on(batch::build(&options))?;
            for path in &report.cards {
                println!("  {}", path.display());
            }
            println!("Embed snippet: {}", report.embed.display());
        }

        Commands::Card {
            name,
            subtitle,
            description,
            language,
            stars,
            forks,
            pushed,
            logo,
            seed,
            scale,
            font,
            format,
            out,
        } => {
            let options = BuildOptions {
                format,
                seed,
                render: RenderConfig::default().with_scale(scale),
                font,
                ..Default::default()
            };
            let spec = CardSpec {
                repo: name.clone(),
                subtitle,
                logo,
                ..Default::default()
            };
            let mut card = PreparedCard::offline(spec, "");
            if card.owner.is_empty() {
                card.link.clear();
            }
            card.metadata = RepoMetadata {
                name,
                description,
                language,
                stars,
                forks,
                pushed_at: pushed,
            };
            if let Some(logo) = LogoRef::parse(&card.spec.logo, &options.root) {
                card.remote_logo = matches!(logo, LogoRef::Remote(_));
                let http = reqwest::Client::new();
                card.logo = runtime.block_on(logo.fetch(&http));
            }

            let font = Font::load_or_fallback(options.font.as_deref());
            batch::render_one(&card, 0, &options, &font).save(&out)?;
            println!("Saved card to {}", out.display());
        }

        Commands::Panel { user, out } => {
            let user = featured::user_or_default(Some(&user));
            let client = GithubClient::from_env()?;
            let path =
                runtime.block_on(panel::build(&client, &user, &out, chrono::Utc::now()))?;
            println!("Saved panel to {}", path.display());
        }
    }

    Ok(())
}
