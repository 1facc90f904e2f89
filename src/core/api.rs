//! Catalog API client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{DashError, Result};
use crate::types::{
    Config, FetchKind, FetchOutcome, FetchRequest, HealthStatus, Listing, PaginatedResult,
    SearchResult,
};

/// The two catalog operations the controller needs.
///
/// Implementations do no caching, retrying or rate limiting.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// `GET /videos`
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PaginatedResult>;

    /// `GET /search`, query percent-encoded
    async fn fetch_search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchResult>;
}

/// Run one controller fetch and tag the result with its sequence number
pub async fn run_fetch(api: &dyn VideoApi, request: FetchRequest) -> FetchOutcome {
    let result: Result<Listing> = match request.kind {
        FetchKind::List { page, page_size } => {
            api.fetch_page(page, page_size).await.map(Into::into)
        }
        FetchKind::Search { ref query, page, page_size } => {
            api.fetch_search(query, page, page_size).await.map(Into::into)
        }
    };

    FetchOutcome {
        seq: request.seq,
        result,
    }
}

/// Strip trailing slashes and reject anything that is not http(s)
pub fn normalize_base(base: &str) -> Result<String> {
    let base = base.trim().trim_end_matches('/');
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(DashError::InvalidConfig(format!(
            "api_base must start with http:// or https://, got '{}'",
            base
        )));
    }
    Ok(base.to_string())
}

/// Build the list URL
fn build_videos_url(base: &str, page: u32, page_size: u32) -> String {
    format!("{}/videos?page={}&page_size={}", base, page, page_size)
}

/// Build the search URL
fn build_search_url(base: &str, query: &str, page: u32, page_size: u32) -> String {
    format!(
        "{}/search?q={}&page={}&page_size={}",
        base,
        urlencoding::encode(query),
        page,
        page_size
    )
}

/// HTTP implementation of [`VideoApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base = normalize_base(&config.api_base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Check that the backend is up (`GET /`)
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json(&format!("{}/", self.base)).await
    }

    /// GET a URL and decode its JSON body.
    ///
    /// A non-success status fails regardless of the body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashError::Transport {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DashError::Parse(format!("{} ({})", e, url)))
    }
}

#[async_trait]
impl VideoApi for ApiClient {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PaginatedResult> {
        self.get_json(&build_videos_url(&self.base, page, page_size)).await
    }

    async fn fetch_search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchResult> {
        self.get_json(&build_search_url(&self.base, query, page, page_size)).await
    }
}
