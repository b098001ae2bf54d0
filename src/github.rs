//! Repository metadata lookup against the GitHub REST API.
//!
//! A 403 or 404 means "not visible" and is reported as `Ok(None)`. Any other
//! failure is an error; whether that error is fatal is the caller's call.

use serde::Deserialize;
use std::time::Duration;

use crate::CardError;
use crate::metadata::RepoMetadata;

const API_BASE: &str = "https://api.github.com";

/// Environment variable holding an optional bearer token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    pushed_at: Option<String>,
}

impl From<ApiRepo> for RepoMetadata {
    fn from(repo: ApiRepo) -> Self {
        Self {
            name: repo.name.unwrap_or_default(),
            description: repo.description.unwrap_or_default(),
            language: repo.language.unwrap_or_default(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            pushed_at: repo.pushed_at.unwrap_or_default(),
        }
    }
}

/// One entry of a user's repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct UserRepo {
    pub name: String,
    pub language: Option<String>,
    pub pushed_at: Option<String>,
    pub fork: bool,
    pub archived: bool,
}

/// Result of a lookup that may have retried with a lowercased name.
#[derive(Debug, Clone)]
pub struct Lookup {
    /// Repository name that answered (may be the lowercased form).
    pub repo: String,
    pub metadata: RepoMetadata,
}

/// Thin GitHub API client.
pub struct GithubClient {
    http: reqwest::Client,
    token: Option<String>,
    base: String,
}

impl GithubClient {
    /// Create a client, optionally authenticated with a bearer token.
    pub fn new(token: Option<String>) -> Result<Self, CardError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("repocard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CardError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            http,
            token: token.filter(|t| !t.trim().is_empty()),
            base: API_BASE.to_string(),
        })
    }

    /// Create a client using the token from `GITHUB_TOKEN`, if set.
    pub fn from_env() -> Result<Self, CardError> {
        Self::new(std::env::var(TOKEN_ENV).ok())
    }

    /// Point the client at another API root (GitHub Enterprise, test servers).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Shared HTTP client, reused for logo downloads.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CardError> {
        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(|e| CardError::Fetch(format!("Failed to fetch {}: {}", url, e)))
    }

    /// Fetch one repository. `Ok(None)` when it is not found or not visible.
    pub async fn repo(&self, owner: &str, repo: &str) -> Result<Option<RepoMetadata>, CardError> {
        let url = format!("{}/repos/{}/{}", self.base, owner, repo);
        let response = self.get(&url).await?;
        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::NOT_FOUND {
            log::debug!("{} answered HTTP {}", url, status);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CardError::Fetch(format!("Failed to fetch {}: HTTP {}", url, status)));
        }

        let repo: ApiRepo = response
            .json()
            .await
            .map_err(|e| CardError::Fetch(format!("Invalid response from {}: {}", url, e)))?;
        Ok(Some(repo.into()))
    }

    /// A user's public repositories, most recently pushed first (one page of 100).
    pub async fn user_repos(&self, user: &str) -> Result<Vec<UserRepo>, CardError> {
        let url = format!("{}/users/{}/repos?per_page=100&sort=pushed", self.base, user);
        let response = self.get(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardError::Fetch(format!("Failed to fetch {}: HTTP {}", url, status)));
        }
        response
            .json()
            .await
            .map_err(|e| CardError::Fetch(format!("Invalid response from {}: {}", url, e)))
    }

    /// Fetch a repository, retrying once with a lowercased name when the
    /// original casing is not found.
    pub async fn lookup(&self, owner: &str, repo: &str) -> Result<Option<Lookup>, CardError> {
        if let Some(metadata) = self.repo(owner, repo).await? {
            return Ok(Some(Lookup {
                repo: repo.to_string(),
                metadata,
            }));
        }
        let lower = repo.to_lowercase();
        if lower == repo {
            return Ok(None);
        }
        Ok(self.repo(owner, &lower).await?.map(|metadata| Lookup {
            repo: lower,
            metadata,
        }))
    }
}
