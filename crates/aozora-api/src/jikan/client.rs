use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::JikanError;
use super::types::{AnimeFull, CharacterEdge, Data, Images, Statistics};

/// Client for the Jikan anime-metadata API (v4-compatible).
pub struct JikanClient {
    base: String,
    http: Client,
}

impl JikanClient {
    pub fn new(base_url: &str) -> Result<Self, JikanError> {
        Url::parse(base_url).map_err(|e| JikanError::Parse(format!("bad endpoint: {e}")))?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "jikan API error");
            Err(JikanError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, JikanError> {
        let resp = self.http.get(format!("{}{path}", self.base)).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))
    }

    /// Full detail record for an anime.
    pub async fn anime_full(&self, id: u64) -> Result<AnimeFull, JikanError> {
        let body: Data<AnimeFull> = self.get_json(&format!("/anime/{id}/full")).await?;
        Ok(body.data)
    }

    /// Character roster for an anime.
    pub async fn characters(&self, id: u64) -> Result<Vec<CharacterEdge>, JikanError> {
        let body: Data<Vec<CharacterEdge>> =
            self.get_json(&format!("/anime/{id}/characters")).await?;
        Ok(body.data)
    }

    /// Backdrop/poster picture set for an anime.
    pub async fn pictures(&self, id: u64) -> Result<Vec<Images>, JikanError> {
        let body: Data<Vec<Images>> = self.get_json(&format!("/anime/{id}/pictures")).await?;
        Ok(body.data)
    }

    /// Watch statistics for an anime.
    pub async fn statistics(&self, id: u64) -> Result<Statistics, JikanError> {
        let body: Data<Statistics> = self.get_json(&format!("/anime/{id}/statistics")).await?;
        Ok(body.data)
    }
}
