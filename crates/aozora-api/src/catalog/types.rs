use chrono::Utc;
use serde::Deserialize;

use crate::traits::CatalogEntry;

// ── Envelope wire types ──────────────────────────────────────────

/// The API wraps everything in an envelope with its own status code.
/// `404` in the envelope is the normal pagination-exhaustion signal,
/// distinct from a transport-level 404.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: u16,
    pub response: Option<ApiResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    /// Single-post lookups populate `entry`.
    pub entry: Option<RawEntry>,
    /// Listings populate `entries`.
    #[serde(default)]
    pub entries: Vec<RawEntry>,
    #[serde(rename = "feedCategories", default)]
    pub feed_categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawEntry {
    pub title: String,
    pub path: String,
    /// HTML fragment of the post body; carries the cover image.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub published: Option<String>,
}

// ── Conversions ──────────────────────────────────────────────────

impl RawEntry {
    pub fn into_entry(self) -> CatalogEntry {
        let image_url = first_image_src(&self.content);
        let published = self
            .published
            .as_deref()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        CatalogEntry {
            title: self.title,
            path: self.path,
            image_url,
            categories: self.categories,
            published,
        }
    }
}

/// Extract the first `<img src="...">` URL from an HTML fragment.
///
/// The post body is template-generated, so a plain scan is enough; no
/// HTML parser needed for one attribute.
pub(crate) fn first_image_src(html: &str) -> Option<String> {
    let img = html.find("<img")?;
    let rest = &html[img..];
    let src = rest.find("src=")?;
    let rest = &rest[src + 4..];
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}
