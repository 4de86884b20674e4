use reqwest::Client;
use url::Url;

use super::error::CatalogError;
use super::types::{ApiEnvelope, RawEntry};
use crate::traits::{CatalogEntry, CatalogSource, EntryPage, ListQuery};

/// Client for the catalog content API.
pub struct CatalogClient {
    base: String,
    blog_id: String,
    http: Client,
}

impl CatalogClient {
    /// Build a client against the given API endpoint.
    pub fn new(base_url: &str, blog_id: impl Into<String>) -> Result<Self, CatalogError> {
        Url::parse(base_url).map_err(|e| CatalogError::Parse(format!("bad endpoint: {e}")))?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            blog_id: blog_id.into(),
            http: Client::new(),
        })
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "catalog API error");
            Err(CatalogError::Api {
                status,
                message: body,
            })
        }
    }

    fn list_params(&self, query: &ListQuery, offset: u32, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("blogID", self.blog_id.clone()),
            ("page", query.feed.as_query_str().to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(id) = query.mal_id {
            params.push(("mal_id", id.to_string()));
        }
        if let Some(ref genre) = query.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(ref status) = query.status {
            params.push(("status", status.clone()));
        }
        if let Some(ref q) = query.search {
            params.push(("q", q.clone()));
        }
        params
    }

    async fn get_envelope(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<ApiEnvelope, CatalogError> {
        let resp = self
            .http
            .get(format!("{}/anime", self.base))
            .query(params)
            .send()
            .await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Fetch one page of a listing.
    ///
    /// An envelope status of 404 is the backend's way of saying the
    /// listing is exhausted; it yields an empty page, never an error.
    pub async fn entries(
        &self,
        query: &ListQuery,
        offset: u32,
        limit: u32,
    ) -> Result<EntryPage, CatalogError> {
        let envelope = self
            .get_envelope(&self.list_params(query, offset, limit))
            .await?;
        match envelope.status {
            404 => Ok(EntryPage::default()),
            200 => {
                let response = envelope
                    .response
                    .ok_or_else(|| CatalogError::Parse("missing response body".into()))?;
                Ok(EntryPage {
                    items: response
                        .entries
                        .into_iter()
                        .map(RawEntry::into_entry)
                        .collect(),
                    categories: response.feed_categories,
                })
            }
            status => Err(CatalogError::Api {
                status,
                message: "unexpected envelope status".into(),
            }),
        }
    }

    /// Fetch a single anime-info post by MAL id, or `None` if the
    /// catalog has no post for it.
    pub async fn entry_by_mal_id(&self, mal_id: u64) -> Result<Option<CatalogEntry>, CatalogError> {
        let params = vec![
            ("blogID", self.blog_id.clone()),
            ("page", "animeinfo".to_string()),
            ("mal_id", mal_id.to_string()),
            ("limit", "1".to_string()),
        ];
        self.single_entry(params).await
    }

    /// Fetch a single post by its `postID`.
    pub async fn entry_by_post(&self, post_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let params = vec![
            ("blogID", self.blog_id.clone()),
            ("page", "animeinfo".to_string()),
            ("postID", post_id.to_string()),
        ];
        self.single_entry(params).await
    }

    async fn single_entry(
        &self,
        params: Vec<(&'static str, String)>,
    ) -> Result<Option<CatalogEntry>, CatalogError> {
        let envelope = self.get_envelope(&params).await?;
        match envelope.status {
            404 => Ok(None),
            200 => {
                let response = envelope
                    .response
                    .ok_or_else(|| CatalogError::Parse("missing response body".into()))?;
                // Some deployments answer single lookups with a one-item
                // `entries` list instead of `entry`.
                let raw = response.entry.or_else(|| response.entries.into_iter().next());
                Ok(raw.map(RawEntry::into_entry))
            }
            status => Err(CatalogError::Api {
                status,
                message: "unexpected envelope status".into(),
            }),
        }
    }
}

impl CatalogSource for CatalogClient {
    type Error = CatalogError;

    async fn fetch_page(
        &self,
        query: &ListQuery,
        offset: u32,
        limit: u32,
    ) -> Result<EntryPage, CatalogError> {
        self.entries(query, offset, limit).await
    }
}
