//! Shared types for catalog listings.
//!
//! The HTTP client and the in-memory test sources both implement
//! `CatalogSource`, so cursors and view controllers stay transport-
//! agnostic.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aozora_parse::EntryMeta;

/// A single catalog post, as consumed by listings and views.
///
/// Immutable once fetched; owned by whichever cursor retrieved it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    /// Blog-relative post path; unique per post.
    pub path: String,
    /// First image embedded in the post body, if any.
    pub image_url: Option<String>,
    /// Raw category tags, in feed order.
    pub categories: Vec<String>,
    pub published: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Decode this entry's category tags into typed metadata.
    pub fn meta(&self) -> EntryMeta {
        EntryMeta::from_tags(&self.categories)
    }
}

/// One page of catalog entries plus the feed's category vocabulary.
#[derive(Debug, Clone, Default)]
pub struct EntryPage {
    pub items: Vec<CatalogEntry>,
    pub categories: Vec<String>,
}

/// Which feed a listing reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    AnimeInfo,
    Episode,
}

impl FeedKind {
    pub fn as_query_str(self) -> &'static str {
        match self {
            Self::AnimeInfo => "animeinfo",
            Self::Episode => "episode",
        }
    }
}

/// Parameters of a catalog listing, fixed for the lifetime of a cursor.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub feed: FeedKind,
    pub mal_id: Option<u64>,
    pub genre: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// The main anime-info feed, unfiltered.
    pub fn anime_info() -> Self {
        Self {
            feed: FeedKind::AnimeInfo,
            mal_id: None,
            genre: None,
            status: None,
            search: None,
        }
    }

    /// Episode feed for one anime.
    pub fn episodes(mal_id: u64) -> Self {
        Self {
            feed: FeedKind::Episode,
            mal_id: Some(mal_id),
            ..Self::anime_info()
        }
    }

    /// Anime-info feed filtered to a text search.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Self::anime_info()
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A paged source of catalog entries.
pub trait CatalogSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page at the given offset. An exhausted listing yields
    /// an empty page, not an error.
    fn fetch_page(
        &self,
        query: &ListQuery,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<EntryPage, Self::Error>> + Send;
}
