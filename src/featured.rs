//! # Card List
//!
//! The JSON file naming which repositories get a card.
//!
//! ```json
//! {
//!   "user": "Tapawingo",
//!   "cards": [
//!     { "repo": "demo", "subtitle": "a tiny tool", "logo": "assets/demo.png" },
//!     { "repo": "someone/else", "href": "https://example.com" }
//!   ]
//! }
//! ```
//!
//! Every card field is optional, and `null` reads the same as a missing key.
//! Cards with neither `repo` nor `href` are dropped.

use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::CardError;

/// User that owns repositories named without an owner.
pub const DEFAULT_USER: &str = "Tapawingo";

/// Deserialize `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One card entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CardSpec {
    /// `name` or `owner/name`.
    #[serde(deserialize_with = "null_as_default")]
    pub repo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub href: String,
    /// Local path (relative to the project root) or http(s) URL.
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
    /// Overrides the repository name.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Overrides the repository description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFeatured {
    user: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    cards: Vec<Option<CardSpec>>,
}

/// Trimmed user, falling back to [`DEFAULT_USER`] when blank.
pub fn user_or_default(user: Option<&str>) -> String {
    user.map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_USER)
        .to_string()
}

/// Parsed card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedConfig {
    pub user: String,
    pub cards: Vec<CardSpec>,
}

impl FeaturedConfig {
    /// Parse the card list from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CardError> {
        let raw: RawFeatured = serde_json::from_str(text)?;
        let user = user_or_default(raw.user.as_deref());
        let cards = raw
            .cards
            .into_iter()
            .flatten()
            .map(|mut card| {
                card.repo = card.repo.trim().to_string();
                card
            })
            .filter(|card| !card.repo.is_empty() || !card.href.is_empty())
            .collect();
        Ok(Self { user, cards })
    }

    /// Owner for cards named without one: a non-blank `override_user`, then
    /// the file's user, then [`DEFAULT_USER`].
    pub fn effective_user(&self, override_user: Option<&str>) -> String {
        match override_user.map(str::trim).filter(|u| !u.is_empty()) {
            Some(user) => user.to_string(),
            None => user_or_default(Some(&self.user)),
        }
    }

    /// Read and parse a card list file.
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}

/// Extract `(owner, repo)` from a `github.com/<owner>/<repo>` link.
pub fn owner_repo_from_href(href: &str) -> Option<(String, String)> {
    let (_, rest) = href.split_once("github.com/")?;
    let mut parts = rest.splitn(3, '/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next()?;
    let repo = repo.split(['#', '?']).next().unwrap_or_default();
    if repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

impl CardSpec {
    /// Resolve the owner and repository name for this card.
    ///
    /// `owner/name` in `repo` wins, then a GitHub link in `href`, then the
    /// default user.
    pub fn owner_repo(&self, default_user: &str) -> (String, String) {
        let repo = self.repo.trim();
        if let Some((owner, name)) = repo.split_once('/') {
            return (owner.to_string(), name.to_string());
        }
        if let Some(found) = owner_repo_from_href(&self.href) {
            return found;
        }
        (default_user.to_string(), repo.to_string())
    }

    /// File stem for this card's artifact: `<owner>__<repo>`.
    pub fn slug(&self, default_user: &str) -> String {
        let (owner, repo) = self.owner_repo(default_user);
        format!("{}__{}", owner, repo).replace('/', "__")
    }

    /// Link target: `href` when set, otherwise the GitHub page.
    pub fn link(&self, owner: &str, repo: &str) -> String {
        if self.href.is_empty() {
            format!("https://github.com/{}/{}", owner, repo)
        } else {
            self.href.clone()
        }
    }
}
