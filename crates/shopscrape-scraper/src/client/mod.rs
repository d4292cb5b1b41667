//! HTTP client for a storefront's public `products.json` endpoint.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::pagination::PageSource;

pub use origin::normalize_base_url;
// Re-export for test visibility via `use super::*`
#[cfg(test)]
use origin::extract_domain;

/// Products requested per page. 250 is the largest page the endpoint serves.
pub const PAGE_SIZE: u32 = 250;

/// HTTP client for a storefront's public `products.json` endpoint.
///
/// Each page request is bounded by a single timeout. Connection failures,
/// timeouts and non-2xx responses come back as typed errors; nothing is
/// retried.
pub struct StorefrontClient {
    pub(super) client: Client,
    /// Upper bound on page requests made by one `fetch_all_products` call.
    pub(super) max_pages: u32,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with the given per-request timeout,
    /// `User-Agent`, and page cap.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_pages: u32,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self { client, max_pages })
    }

    /// Fetches one page of the product listing and returns the raw body.
    ///
    /// Issues `GET {base_url}/products.json?limit=250&page={page}`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidPage`] — `page` is `0`.
    /// - [`ScraperError::InvalidBaseUrl`] — `base_url` is not an absolute http(s) URL.
    /// - [`ScraperError::Http`] — connection failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    pub async fn fetch_page(&self, base_url: &str, page: u32) -> Result<String, ScraperError> {
        let url = Self::products_url(base_url, page)?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ScraperError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                domain = %origin::extract_domain(base_url),
                page,
                status = status.as_u16(),
                "storefront returned non-success status"
            );
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|source| ScraperError::Http { url, source })
    }

    /// Builds the `products.json` URL for the given base URL and page number.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPage`] for page `0` and
    /// [`ScraperError::InvalidBaseUrl`] if `base_url` fails validation.
    fn products_url(base_url: &str, page: u32) -> Result<String, ScraperError> {
        if page == 0 {
            return Err(ScraperError::InvalidPage { page });
        }
        let base = normalize_base_url(base_url)?;
        let mut url = reqwest::Url::parse(&format!("{base}/products.json")).map_err(|e| {
            ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;

        url.query_pairs_mut()
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());

        Ok(url.to_string())
    }
}

impl PageSource for StorefrontClient {
    async fn fetch_page(&self, base_url: &str, page: u32) -> Result<String, ScraperError> {
        StorefrontClient::fetch_page(self, base_url, page).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
