use thiserror::Error;

use crate::types::CatalogId;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field \"{field}\" of product {product_id} is not an array")]
    NotAnArray {
        field: String,
        product_id: CatalogId,
    },

    #[error(
        "variant {variant_id} references product {product_id}, which matched {matches} products in the batch (expected exactly 1)"
    )]
    JoinIntegrity {
        variant_id: CatalogId,
        product_id: CatalogId,
        matches: usize,
    },

    #[error("JSON encoding error for {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached for {base_url}: exceeded {max_pages} pages")]
    PaginationLimit { base_url: String, max_pages: u32 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid page number {page}: pages start at 1")]
    InvalidPage { page: u32 },
}

impl ScraperError {
    /// Returns `true` for failures of the page request itself: connection
    /// errors, timeouts, and non-2xx responses.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ScraperError::Http { .. } | ScraperError::UnexpectedStatus { .. }
        )
    }

    /// Returns `true` when a page body could not be turned into products.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ScraperError::Parse { .. } | ScraperError::NotAnArray { .. }
        )
    }
}
