//! Repository metadata as consumed by the renderers.

use chrono::DateTime;

/// Read-only facts about one repository.
///
/// Every field defaults to empty/zero so a card can still render when the
/// repository could not be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoMetadata {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    /// Raw last-push timestamp (RFC 3339), possibly empty.
    pub pushed_at: String,
}

impl RepoMetadata {
    /// Placeholder metadata for a repository that could not be fetched.
    pub fn fallback(repo: &str) -> Self {
        Self {
            name: repo.to_string(),
            ..Default::default()
        }
    }
}

/// Normalize a push timestamp to `YYYY-MM-DD`.
///
/// Unparseable input keeps its first ten characters; empty stays empty.
pub fn push_date(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.chars().take(10).collect(),
    }
}
