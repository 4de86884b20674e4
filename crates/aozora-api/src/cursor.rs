//! Pagination bookkeeping for catalog listings.
//!
//! One `FetchCursor` per logical listing (episode list, search results,
//! modal pagination). The cursor is a plain state machine; the async
//! driver at the bottom wires it to a `CatalogSource`.

use std::collections::HashSet;

use tracing::debug;

use crate::traits::{CatalogEntry, CatalogSource, EntryPage, ListQuery};

/// Client-side pagination state for one logical listing.
///
/// Tracks offset/limit/exhaustion across repeated page fetches and
/// accumulates results in order without duplicates. At most one request
/// is outstanding per cursor: `begin` refuses a ticket while a fetch is
/// in flight.
#[derive(Debug)]
pub struct FetchCursor {
    offset: u32,
    limit: u32,
    has_more: bool,
    in_flight: bool,
    generation: u64,
    entries: Vec<CatalogEntry>,
    seen: HashSet<String>,
}

/// Permission to run one page fetch, tied to the cursor generation it
/// was issued against.
#[derive(Debug, Clone, Copy)]
pub struct PageTicket {
    pub offset: u32,
    pub limit: u32,
    generation: u64,
}

/// Result of driving one page through the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New entries were appended.
    Fetched(usize),
    /// The backend is out of pages.
    Exhausted,
    /// A fetch was already in flight; this call was a no-op.
    Busy,
    /// The response belonged to a superseded generation and was dropped.
    Stale,
}

impl FetchCursor {
    pub fn new(limit: u32) -> Self {
        debug_assert!(limit > 0);
        Self {
            offset: 0,
            limit,
            has_more: true,
            in_flight: false,
            generation: 0,
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Ask to start a page fetch.
    ///
    /// Returns `None` while another fetch is in flight — concurrent
    /// calls are rejected, never queued. With `reset`, accumulated
    /// entries are cleared and the offset rewound before the ticket is
    /// issued; the generation bump makes any response still in the air
    /// land stale.
    pub fn begin(&mut self, reset: bool) -> Option<PageTicket> {
        if self.in_flight {
            return None;
        }
        if reset {
            self.entries.clear();
            self.seen.clear();
            self.offset = 0;
            self.has_more = true;
            self.generation += 1;
        }
        self.in_flight = true;
        Some(PageTicket {
            offset: self.offset,
            limit: self.limit,
            generation: self.generation,
        })
    }

    /// Apply a fetched page.
    ///
    /// The offset advances by the returned count; a page shorter than
    /// the limit marks the cursor exhausted. Entries whose path was
    /// already accumulated are skipped.
    pub fn complete(&mut self, ticket: PageTicket, items: Vec<CatalogEntry>) -> FetchOutcome {
        if ticket.generation != self.generation {
            return FetchOutcome::Stale;
        }
        self.in_flight = false;
        let returned = items.len() as u32;
        self.has_more = returned == self.limit;
        self.offset += returned;

        let mut appended = 0;
        for entry in items {
            if self.seen.insert(entry.path.clone()) {
                self.entries.push(entry);
                appended += 1;
            }
        }
        debug!(
            offset = self.offset,
            has_more = self.has_more,
            appended,
            "page applied"
        );
        if returned == 0 {
            FetchOutcome::Exhausted
        } else {
            FetchOutcome::Fetched(appended)
        }
    }

    /// Record a failed fetch. The latch clears; offset and accumulated
    /// entries are untouched, so a retry re-requests the same page.
    pub fn fail(&mut self, ticket: PageTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Abandon any outstanding request: bump the generation so its
    /// response is discarded on arrival, and release the latch.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Fetch one page from `source` into `cursor`.
///
/// Calls while a fetch is in flight return `Busy` without issuing a
/// request. The latch is released on success and failure alike.
pub async fn fetch_page<S: CatalogSource>(
    cursor: &mut FetchCursor,
    source: &S,
    query: &ListQuery,
    reset: bool,
) -> Result<FetchOutcome, S::Error> {
    let Some(ticket) = cursor.begin(reset) else {
        return Ok(FetchOutcome::Busy);
    };
    match source.fetch_page(query, ticket.offset, ticket.limit).await {
        Ok(EntryPage { items, .. }) => Ok(cursor.complete(ticket, items)),
        Err(err) => {
            cursor.fail(ticket);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::catalog::CatalogError;

    fn entry(path: &str) -> CatalogEntry {
        CatalogEntry {
            title: path.to_string(),
            path: path.to_string(),
            image_url: None,
            categories: Vec::new(),
            published: None,
        }
    }

    fn entries(n: usize, start: usize) -> Vec<CatalogEntry> {
        (start..start + n).map(|i| entry(&format!("/p/{i}"))).collect()
    }

    #[test]
    fn test_full_page_has_more() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        assert_eq!(ticket.offset, 0);
        let outcome = cursor.complete(ticket, entries(4, 0));
        assert_eq!(outcome, FetchOutcome::Fetched(4));
        assert!(cursor.has_more());
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn test_short_page_exhausts() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        cursor.complete(ticket, entries(2, 0));
        assert!(!cursor.has_more());
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.entries().len(), 2);
    }

    #[test]
    fn test_empty_page_is_exhausted_not_error() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        assert_eq!(cursor.complete(ticket, Vec::new()), FetchOutcome::Exhausted);
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_begin_while_in_flight_is_noop() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        assert!(cursor.begin(false).is_none());
        assert!(cursor.begin(true).is_none());
        cursor.complete(ticket, entries(4, 0));
        assert_eq!(cursor.entries().len(), 4);
        // Latch released; next begin succeeds at the advanced offset.
        let next = cursor.begin(false).unwrap();
        assert_eq!(next.offset, 4);
    }

    #[test]
    fn test_reset_clears_accumulated_before_refetch() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        cursor.complete(ticket, entries(4, 0));

        let ticket = cursor.begin(true).unwrap();
        assert_eq!(ticket.offset, 0);
        assert!(cursor.entries().is_empty());
        cursor.complete(ticket, entries(3, 10));
        assert_eq!(cursor.entries().len(), 3);
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_stale_generation_discarded() {
        let mut cursor = FetchCursor::new(4);
        let old = cursor.begin(false).unwrap();
        cursor.invalidate();
        // Old response arrives after the listing was superseded.
        assert_eq!(cursor.complete(old, entries(4, 0)), FetchOutcome::Stale);
        assert!(cursor.entries().is_empty());
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_fail_releases_latch_keeps_offset() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        cursor.complete(ticket, entries(4, 0));
        let ticket = cursor.begin(false).unwrap();
        cursor.fail(ticket);
        assert!(!cursor.is_in_flight());
        assert_eq!(cursor.begin(false).unwrap().offset, 4);
    }

    #[test]
    fn test_overlapping_pages_deduplicate() {
        let mut cursor = FetchCursor::new(4);
        let ticket = cursor.begin(false).unwrap();
        cursor.complete(ticket, entries(4, 0));
        let ticket = cursor.begin(false).unwrap();
        // Backend re-serves one entry at the page boundary.
        let outcome = cursor.complete(ticket, entries(4, 3));
        assert_eq!(outcome, FetchOutcome::Fetched(3));
        assert_eq!(cursor.entries().len(), 7);
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
    async fn test_driver_success_and_failure() {
        let source = StubSource::new(vec![
            Ok(EntryPage {
                items: entries(4, 0),
                categories: Vec::new(),
            }),
            Err(CatalogError::Api {
                status: 500,
                message: "boom".into(),
            }),
        ]);
        let mut cursor = FetchCursor::new(4);
        let query = ListQuery::anime_info();

        let outcome = fetch_page(&mut cursor, &source, &query, false).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Fetched(4));

        let err = fetch_page(&mut cursor, &source, &query, false).await;
        assert!(err.is_err());
        // Latch released on the failure path too.
        assert!(!cursor.is_in_flight());
        assert_eq!(cursor.entries().len(), 4);
    }
}
