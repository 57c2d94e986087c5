use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::types::{Category, ParentsEnvelope, SubcategoriesEnvelope, Subcategory};

/// Upper bound on a taxonomy response body.
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Per-request budget covering connect, headers and body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Background fetch panicked: {0}")]
    TaskPanicked(String),
}

impl TaxonomyError {
    /// True for transport-level failures: timeouts, connection errors,
    /// non-2xx statuses and oversized bodies.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TaxonomyError::Timeout(_)
                | TaxonomyError::Network(_)
                | TaxonomyError::HttpStatus(_)
                | TaxonomyError::ResponseTooLarge(_)
        )
    }
}

/// Thin wrapper over the two taxonomy read endpoints.
///
/// Every call issues exactly one GET. Deduplication and memoization live in
/// [`crate::nav::SubcategoryCache`]; this type only turns HTTP into domain
/// values or a [`TaxonomyError`].
#[derive(Debug, Clone)]
pub struct TaxonomyClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl TaxonomyClient {
    /// Build a client for `base_url` (e.g. `http://localhost:3300`).
    ///
    /// # Arguments
    ///
    /// * `http` - Shared reqwest client (redirect policy, connection pool)
    /// * `base_url` - Service root; endpoint paths are appended to it
    /// * `timeout` - Budget for each request, body included
    ///
    /// # Errors
    ///
    /// [`TaxonomyError::InvalidBaseUrl`] when the URL does not parse, cannot
    /// be a base, or uses a scheme other than `http`/`https`. Plain HTTP to
    /// anything other than localhost is allowed but logged.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, TaxonomyError> {
        let base =
            Url::parse(base_url).map_err(|e| TaxonomyError::InvalidBaseUrl(e.to_string()))?;

        match base.scheme() {
            "https" => {}
            "http" => {
                let is_localhost = matches!(
                    base.host_str(),
                    Some("localhost") | Some("127.0.0.1") | Some("[::1]")
                );
                if !is_localhost {
                    tracing::warn!(base_url = %base, "Taxonomy service reached over plain HTTP");
                }
            }
            other => {
                return Err(TaxonomyError::InvalidBaseUrl(format!(
                    "unsupported scheme '{}'",
                    other
                )));
            }
        }

        if base.cannot_be_a_base() {
            return Err(TaxonomyError::InvalidBaseUrl(base.to_string()));
        }

        Ok(Self {
            http,
            base,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/categories/parents`
    pub async fn fetch_top_categories(&self) -> Result<Vec<Category>, TaxonomyError> {
        let url = self.endpoint(&["api", "categories", "parents"]);
        let envelopes: Vec<ParentsEnvelope> = self.get_json(url).await?;

        let nodes = envelopes
            .into_iter()
            .next()
            .and_then(|e| e.parents)
            .ok_or_else(|| {
                TaxonomyError::MalformedResponse("missing `parents` field".to_string())
            })?;

        tracing::debug!(count = nodes.len(), "Fetched top-level categories");
        Ok(nodes.into_iter().map(|n| n.into_category()).collect())
    }

    /// `GET /api/categories/subcategories/{category_id}`
    ///
    /// The id is sent as a single percent-encoded path segment.
    pub async fn fetch_subcategories(
        &self,
        category_id: &str,
    ) -> Result<Vec<Subcategory>, TaxonomyError> {
        let url = self.endpoint(&["api", "categories", "subcategories", category_id]);
        let envelopes: Vec<SubcategoriesEnvelope> = self.get_json(url).await?;

        let nodes = envelopes
            .into_iter()
            .next()
            .and_then(|e| e.subcategories)
            .ok_or_else(|| {
                TaxonomyError::MalformedResponse("missing `subcategories` field".to_string())
            })?;

        tracing::debug!(category_id, count = nodes.len(), "Fetched subcategories");
        Ok(nodes
            .into_iter()
            .map(|n| n.into_subcategory(category_id))
            .collect())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TaxonomyError> {
        let bytes = tokio::time::timeout(self.timeout, self.get_bytes(url))
            .await
            .map_err(|_| TaxonomyError::Timeout(self.timeout))??;

        serde_json::from_slice(&bytes).map_err(|e| TaxonomyError::MalformedResponse(e.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, TaxonomyError> {
        tracing::trace!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(TaxonomyError::Network)?;

        if !response.status().is_success() {
            return Err(TaxonomyError::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, MAX_RESPONSE_SIZE).await
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TaxonomyError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(TaxonomyError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(TaxonomyError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(TaxonomyError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
