//! # HTTP Catalog
//!
//! Catalog provider backed by the store's HTTP data-access layer.
//!
//! ## Endpoints
//! ```text
//! GET {base}/products/barcode/{code}  →  ProviderResponse<CatalogEntry>
//! GET {base}/products                 →  ProviderResponse<Vec<CatalogEntry>>
//! ```
//!
//! A `404` on the barcode endpoint, or `success: true` without data, means
//! the code is unknown. Every other non-success status is a transport error.
//!
//! Entries are validated like the ones of a file catalog. A bad barcode hit
//! is [`CatalogError::InvalidEntry`]; bad entries of a listing are dropped.

use std::time::Duration;

use async_trait::async_trait;
use comptoir_core::CatalogEntry;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CatalogError, CatalogResult};
use crate::provider::{CatalogProvider, ProviderResponse};

/// Catalog provider talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a provider rooted at `base_url`.
    ///
    /// `request_timeout` bounds each HTTP request; the resolver applies its
    /// own lookup timeout on top.
    pub fn new(base_url: &str, request_timeout: Duration) -> CatalogResult<Self> {
        let base_url = parse_base(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(HttpCatalog { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Transport(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<Option<T>> {
        tracing::debug!(%url, "Catalog request");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Transport(format!("HTTP {}: {}", status, text)));
        }

        let body = resp.bytes().await?;
        decode_envelope(&body)
    }
}

fn parse_base(base_url: &str) -> CatalogResult<Url> {
    Url::parse(base_url)
        .map_err(|e| CatalogError::Transport(format!("invalid base URL '{}': {}", base_url, e)))
}

fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> CatalogResult<Option<T>> {
    let envelope: ProviderResponse<T> = serde_json::from_slice(body)?;
    envelope.into_result()
}

fn checked(entry: CatalogEntry) -> CatalogResult<CatalogEntry> {
    match entry.validate() {
        Ok(()) => Ok(entry),
        Err(source) => Err(CatalogError::InvalidEntry {
            id: entry.id,
            source,
        }),
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn get_by_barcode(&self, code: &str) -> CatalogResult<Option<CatalogEntry>> {
        let url = self.endpoint(&["products", "barcode", code.trim()])?;
        self.fetch(url).await?.map(checked).transpose()
    }

    async fn get_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let url = self.endpoint(&["products"])?;
        let entries: Vec<CatalogEntry> = self.fetch(url).await?.unwrap_or_default();
        Ok(entries
            .into_iter()
            .filter_map(|entry| match checked(entry) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "Dropping invalid catalog entry");
                    None
                }
            })
            .collect())
    }
}
