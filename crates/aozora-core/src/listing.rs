//! Cursor-backed listing controllers and detail aggregation.

use tracing::warn;

use aozora_api::cursor::{fetch_page, FetchCursor, FetchOutcome};
use aozora_api::jikan::{AnimeFull, CharacterEdge, Images, JikanClient, JikanError, Statistics};
use aozora_api::traits::{CatalogEntry, CatalogSource, ListQuery};
use aozora_parse::episode;

use crate::view::LoadPhase;

/// A paged listing bound to one query.
///
/// One instance per logical listing; a changed query means a fresh
/// listing (or `reload`, which resets the cursor in place).
#[derive(Debug)]
pub struct Listing {
    query: ListQuery,
    cursor: FetchCursor,
    phase: LoadPhase,
}

impl Listing {
    pub fn new(query: ListQuery, limit: u32) -> Self {
        Self {
            query,
            cursor: FetchCursor::new(limit),
            phase: LoadPhase::Loading,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        self.cursor.entries()
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    /// Fetch the next page. `Busy` while a fetch is in flight.
    pub async fn load_more<S: CatalogSource>(
        &mut self,
        source: &S,
    ) -> Result<FetchOutcome, S::Error> {
        self.fetch(source, false).await
    }

    /// Throw away accumulated entries and refetch from the start.
    ///
    /// Any response still in flight lands stale and is discarded.
    pub async fn reload<S: CatalogSource>(&mut self, source: &S) -> Result<FetchOutcome, S::Error> {
        self.cursor.invalidate();
        self.phase = LoadPhase::Loading;
        self.fetch(source, true).await
    }

    async fn fetch<S: CatalogSource>(
        &mut self,
        source: &S,
        reset: bool,
    ) -> Result<FetchOutcome, S::Error> {
        match fetch_page(&mut self.cursor, source, &self.query, reset).await {
            Ok(FetchOutcome::Busy) => Ok(FetchOutcome::Busy),
            Ok(outcome) => {
                self.phase = LoadPhase::Loaded;
                Ok(outcome)
            }
            Err(err) => {
                self.phase = LoadPhase::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// Leave `Error` and re-enter `Loading`; the caller issues the next
    /// `load_more`. Returns false outside `Error`.
    pub fn retry(&mut self) -> bool {
        if matches!(self.phase, LoadPhase::Error(_)) {
            self.phase = LoadPhase::Loading;
            true
        } else {
            false
        }
    }

    /// Accumulated entries ordered by numeric episode value, decimal
    /// specials in place ("2.5" between "2" and "3").
    pub fn episodes_sorted(&self) -> Vec<CatalogEntry> {
        let mut entries = self.cursor.entries().to_vec();
        entries.sort_by(|a, b| {
            episode::compare(a.meta().episode_number, b.meta().episode_number)
        });
        entries
    }
}

/// Full metadata bundle for an anime-info view.
#[derive(Debug)]
pub struct AnimeDetails {
    pub full: AnimeFull,
    pub characters: Vec<CharacterEdge>,
    pub pictures: Vec<Images>,
    pub statistics: Option<Statistics>,
}

/// Fetch the detail bundle for one anime.
///
/// The full record is primary and its failure surfaces. Characters,
/// pictures and statistics are cosmetic: each degrades to empty when
/// its fetch fails, without blocking the rest.
pub async fn fetch_details(jikan: &JikanClient, mal_id: u64) -> Result<AnimeDetails, JikanError> {
    let full = jikan.anime_full(mal_id).await?;

    let (characters, pictures, statistics) = futures::join!(
        jikan.characters(mal_id),
        jikan.pictures(mal_id),
        jikan.statistics(mal_id),
    );

    Ok(AnimeDetails {
        full,
        characters: characters.unwrap_or_else(|e| {
            warn!(mal_id, error = %e, "character fetch failed");
            Vec::new()
        }),
        pictures: pictures.unwrap_or_else(|e| {
            warn!(mal_id, error = %e, "picture fetch failed");
            Vec::new()
        }),
        statistics: statistics
            .map_err(|e| warn!(mal_id, error = %e, "statistics fetch failed"))
            .ok(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use aozora_api::catalog::CatalogError;
    use aozora_api::traits::EntryPage;

    use super::*;

    fn entry(path: &str, categories: &[&str]) -> CatalogEntry {
        CatalogEntry {
            title: path.to_string(),
            path: path.to_string(),
            image_url: None,
            categories: categories.iter().map(|s| s.to_string()).collect(),
            published: None,
        }
    }

    struct StubSource {
        pages: Mutex<Vec<Result<EntryPage, CatalogError>>>,
    }

    impl StubSource {
        fn new(pages: Vec<Result<EntryPage, CatalogError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
            }
        }

        fn page(items: Vec<CatalogEntry>) -> Result<EntryPage, CatalogError> {
            Ok(EntryPage {
                items,
                categories: Vec::new(),
            })
        }
    }

    impl CatalogSource for StubSource {
        type Error = CatalogError;

        async fn fetch_page(
            &self,
            _query: &ListQuery,
            _offset: u32,
            _limit: u32,
        ) -> Result<EntryPage, CatalogError> {
            self.pages.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn test_listing_loads_and_sorts_episodes() {
        let source = StubSource::new(vec![StubSource::page(vec![
            entry("/e1", &["episode:1"]),
            entry("/e25", &["episode:2.5"]),
            entry("/e2", &["episode:2"]),
        ])]);
        let mut listing = Listing::new(ListQuery::episodes(52991), 4);

        listing.load_more(&source).await.unwrap();
        assert_eq!(listing.phase(), &LoadPhase::Loaded);
        // Short page: nothing left to fetch.
        assert!(!listing.has_more());

        let episodes: Vec<String> = listing
            .episodes_sorted()
            .iter()
            .filter_map(|e| e.meta().episode)
            .collect();
        assert_eq!(episodes, vec!["1", "2", "2.5"]);
    }

    #[tokio::test]
    async fn test_listing_error_and_retry() {
        let source = StubSource::new(vec![
            Err(CatalogError::Api {
                status: 500,
                message: "boom".into(),
            }),
            StubSource::page(vec![entry("/a", &[])]),
        ]);
        let mut listing = Listing::new(ListQuery::anime_info(), 4);

        assert!(listing.load_more(&source).await.is_err());
        assert!(matches!(listing.phase(), LoadPhase::Error(_)));

        assert!(listing.retry());
        listing.load_more(&source).await.unwrap();
        assert_eq!(listing.phase(), &LoadPhase::Loaded);
        assert_eq!(listing.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_discards_accumulated() {
        let source = StubSource::new(vec![
            StubSource::page(vec![entry("/old", &[])]),
            StubSource::page(vec![entry("/new", &[])]),
        ]);
        let mut listing = Listing::new(ListQuery::search("frieren"), 1);

        listing.load_more(&source).await.unwrap();
        assert_eq!(listing.entries()[0].path, "/old");

        listing.reload(&source).await.unwrap();
        assert_eq!(listing.entries().len(), 1);
        assert_eq!(listing.entries()[0].path, "/new");
    }
}
