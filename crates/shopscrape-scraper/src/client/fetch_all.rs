//! Whole-catalog fetch for `StorefrontClient`.

use crate::catalog::{scrape_catalog, CatalogTables};
use crate::error::ScraperError;
use crate::pagination;
use crate::types::Product;

use super::StorefrontClient;

impl StorefrontClient {
    /// Fetches every product from a storefront, one page at a time, until a
    /// page comes back empty.
    ///
    /// Each product gets `url = {base_url}/products/{handle}`. An empty
    /// catalog returns an empty `Vec`.
    ///
    /// **All-or-nothing semantics**: on any page failure, already-fetched
    /// products from earlier pages are discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`] or page parsing.
    /// Returns [`ScraperError::PaginationLimit`] if the catalog does not end
    /// within the client's page cap.
    pub async fn fetch_all_products(&self, base_url: &str) -> Result<Vec<Product>, ScraperError> {
        pagination::fetch_all_products(self, base_url, self.max_pages).await
    }

    /// Fetches a storefront's catalog and flattens it into products,
    /// variants, and images tables.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_all_products`] and
    /// [`ScraperError::JoinIntegrity`] from the variant join.
    pub async fn scrape_catalog(&self, base_url: &str) -> Result<CatalogTables, ScraperError> {
        scrape_catalog(self, base_url, self.max_pages).await
    }
}
