//! Logo resolution: turns a card's logo reference into bytes, a decoded image,
//! or a `data:` URI.
//!
//! Every failure here degrades to "no logo" with a warning; the renderers then
//! draw their stub instead.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Where a logo lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoRef {
    Remote(String),
    Local(PathBuf),
}

/// Downloaded or read logo bytes with their media type, when known.
#[derive(Debug, Clone)]
pub struct LogoBytes {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

/// Media types accepted for local logo files.
const LOCAL_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp", "image/svg+xml"];

/// Append `raw=1` to GitHub `/blob/` URLs so they serve the file itself.
pub fn normalize_blob_url(url: &str) -> String {
    if url.contains("github.com/") && url.contains("/blob/") && !url.contains("raw=") {
        let joiner = if url.contains('?') { '&' } else { '?' };
        format!("{}{}raw=1", url, joiner)
    } else {
        url.to_string()
    }
}

/// Media type guessed from a file extension, limited to the logo formats.
pub fn mime_for_path(path: &Path) -> Option<String> {
    let guess = mime_guess::from_path(path).first_raw()?;
    LOCAL_MIME_TYPES.contains(&guess).then(|| guess.to_string())
}

impl LogoRef {
    /// Classify a reference. Empty references mean "no logo".
    pub fn parse(reference: &str, root: &Path) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            Some(LogoRef::Remote(normalize_blob_url(reference)))
        } else {
            Some(LogoRef::Local(root.join(reference)))
        }
    }

    /// Read or download the logo.
    pub async fn fetch(&self, http: &reqwest::Client) -> Option<LogoBytes> {
        match self {
            LogoRef::Local(path) => {
                let mime = mime_for_path(path);
                match std::fs::read(path) {
                    Ok(bytes) => Some(LogoBytes { bytes, mime }),
                    Err(e) => {
                        log::warn!("logo {} unreadable: {}", path.display(), e);
                        None
                    }
                }
            }
            LogoRef::Remote(url) => {
                let response = match http.get(url).send().await {
                    Ok(response) => response,
                    Err(e) => {
                        log::warn!("logo {} download failed: {}", url, e);
                        return None;
                    }
                };
                if !response.status().is_success() {
                    log::warn!("logo {} download failed: HTTP {}", url, response.status());
                    return None;
                }
                let header_mime = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(';').next())
                    .map(|v| v.trim().to_lowercase())
                    .filter(|v| !v.is_empty());
                let mime = header_mime.or_else(|| {
                    mime_guess::from_path(url.split(['?', '#']).next().unwrap_or(url))
                        .first_raw()
                        .map(str::to_string)
                });
                match response.bytes().await {
                    Ok(bytes) => Some(LogoBytes {
                        bytes: bytes.to_vec(),
                        mime,
                    }),
                    Err(e) => {
                        log::warn!("logo {} body unreadable: {}", url, e);
                        None
                    }
                }
            }
        }
    }
}

impl LogoBytes {
    /// Decode into a raster image. Vector formats and corrupt files yield `None`.
    pub fn decode(&self) -> Option<DynamicImage> {
        match image::load_from_memory(&self.bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("logo could not be decoded ({}); using stub", e);
                None
            }
        }
    }

    /// `data:<mime>;base64,<payload>` for embedding in SVG.
    ///
    /// Local files of unknown type have no URI; remote ones fall back to
    /// `application/octet-stream`.
    pub fn data_uri(&self, remote: bool) -> Option<String> {
        let mime = match (&self.mime, remote) {
            (Some(mime), _) => mime.as_str(),
            (None, true) => "application/octet-stream",
            (None, false) => return None,
        };
        Some(format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes)))
    }
}
