//! HTTP client for the recall directory API.
//!
//! Thin typed wrapper over the backend's read endpoints plus the watchlist
//! CRUD. The outbound `/recalls` parameters come straight from the query
//! codec so the canonical query stays the single source of truth for what
//! is being asked for.
//!
//! Note the backend returns an empty list and a failure as two different
//! things here: transport and status errors surface as [`ApiError`] instead
//! of being swallowed into `[]`, and the caller decides what to show.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::model::{Recall, WatchlistItem};
use crate::query::{self, RecallQuery};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Typed client over the recall API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    user_id: i64,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base: config.api_base.clone(),
            user_id: config.user_id,
        })
    }

    /// GET `/recalls` filtered by the canonical query.
    pub async fn fetch_recalls(&self, query: &RecallQuery) -> ApiResult<Vec<Recall>> {
        let encoded = query::encode(query);
        let url = if encoded.is_empty() {
            format!("{}/recalls", self.base)
        } else {
            format!("{}/recalls?{encoded}", self.base)
        };
        debug!(%url, "fetching recalls");
        self.get_json(&url).await
    }

    /// GET `/watchlists` — the user's tracked items.
    pub async fn fetch_watchlist(&self) -> ApiResult<Vec<WatchlistItem>> {
        let url = format!("{}/watchlists", self.base);
        self.get_json(&url).await
    }

    /// POST `/watchlists` — track a new item.
    pub async fn add_watchlist(&self, kind: &str, value: &str) -> ApiResult<WatchlistItem> {
        let url = format!("{}/watchlists", self.base);
        let payload = json!({
            "type": kind,
            "value": value,
            "user_id": self.user_id,
        });
        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        let resp = check_status(resp, &url).await?;
        resp.json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    /// DELETE `/watchlists/{id}` — stop tracking an item.
    pub async fn delete_watchlist(&self, id: i64) -> ApiResult<()> {
        let url = format!("{}/watchlists/{id}", self.base);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        check_status(resp, &url).await?;
        Ok(())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let resp = check_status(resp, url).await?;
        resp.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

async fn check_status(resp: reqwest::Response, url: &str) -> ApiResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        url: url.to_string(),
        status,
        body,
    })
}
