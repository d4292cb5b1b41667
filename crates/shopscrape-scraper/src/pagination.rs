//! Page-number pagination over a storefront's `products.json` listing.
//!
//! The listing is requested as `?limit=250&page=N` starting at `N = 1`. The
//! catalog ends at the first page that comes back with an empty `products`
//! array; no page past that one is ever requested.
//!
//! [`Paginator`] walks the pages lazily and keeps count of what it has fetched
//! and yielded. It is bounded by a page cap so a storefront that never returns
//! an empty page cannot keep the loop alive forever.

use std::future::Future;

use crate::client::normalize_base_url;
use crate::error::ScraperError;
use crate::types::{Product, ProductsResponse};

/// Anything that can return the raw body of one listing page.
///
/// [`crate::StorefrontClient`] is the HTTP implementation; tests plug in an
/// in-memory source.
pub trait PageSource {
    /// Returns the raw JSON body of `page` (1-based) of the listing under
    /// `base_url`.
    fn fetch_page(
        &self,
        base_url: &str,
        page: u32,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// Parses one `products.json` body into its products.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] if the body is not JSON, has no `products`
/// key, or contains a product whose identity does not parse as an integer.
pub fn parse_products_page(body: &str, context: &str) -> Result<Vec<Product>, ScraperError> {
    serde_json::from_str::<ProductsResponse>(body)
        .map(|response| response.products)
        .map_err(|source| ScraperError::Parse {
            context: context.to_owned(),
            source,
        })
}

/// Lazy, restartable walk over the pages of one storefront listing.
pub struct Paginator<'a, S> {
    source: &'a S,
    base_url: String,
    max_pages: u32,
    next_page: u32,
    pages_fetched: u32,
    products_yielded: usize,
    exhausted: bool,
}

impl<'a, S: PageSource> Paginator<'a, S> {
    /// Creates a paginator positioned before page 1.
    ///
    /// `max_pages` is the maximum number of page requests, including the
    /// final empty page that signals the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` fails validation.
    pub fn new(source: &'a S, base_url: &str, max_pages: u32) -> Result<Self, ScraperError> {
        Ok(Self {
            source,
            base_url: normalize_base_url(base_url)?,
            max_pages,
            next_page: 1,
            pages_fetched: 0,
            products_yielded: 0,
            exhausted: false,
        })
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(Some(products))` for a non-empty page and `Ok(None)` once
    /// the catalog has ended. After `Ok(None)` or an error, every further call
    /// returns `Ok(None)` without touching the source until [`Self::restart`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::PaginationLimit`] — `max_pages` requests were made
    ///   without reaching an empty page.
    /// - Any error from the [`PageSource`] or from [`parse_products_page`].
    pub async fn next_page(&mut self) -> Result<Option<Vec<Product>>, ScraperError> {
        if self.exhausted {
            return Ok(None);
        }
        if self.pages_fetched >= self.max_pages {
            self.exhausted = true;
            return Err(ScraperError::PaginationLimit {
                base_url: self.base_url.clone(),
                max_pages: self.max_pages,
            });
        }

        let page = self.next_page;
        let fetched = self.source.fetch_page(&self.base_url, page).await;
        self.pages_fetched += 1;

        let context = format!("page {page} of {}", self.base_url);
        let parsed = fetched.and_then(|body| parse_products_page(&body, &context));
        let products = match parsed {
            Ok(products) => products,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        tracing::debug!(
            base_url = %self.base_url,
            page,
            count = products.len(),
            "fetched product page"
        );

        if products.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.next_page += 1;
        self.products_yielded += products.len();
        Ok(Some(products))
    }

    /// Rewinds to page 1 and zeroes the counters.
    pub fn restart(&mut self) {
        self.next_page = 1;
        self.pages_fetched = 0;
        self.products_yielded = 0;
        self.exhausted = false;
    }

    /// Number of page requests made since creation or the last restart.
    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Number of products handed out since creation or the last restart.
    #[must_use]
    pub fn products_yielded(&self) -> usize {
        self.products_yielded
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The validated base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Fetches every product of a storefront, page by page, and derives each
/// product's `url`.
///
/// Pages are concatenated in fetch order; products keep their in-page order.
///
/// **All-or-nothing semantics**: on any page failure the products collected
/// from earlier pages are discarded and the error is returned.
///
/// # Errors
///
/// Propagates any error from [`Paginator::new`] or [`Paginator::next_page`].
pub async fn fetch_all_products<S: PageSource>(
    source: &S,
    base_url: &str,
    max_pages: u32,
) -> Result<Vec<Product>, ScraperError> {
    let mut paginator = Paginator::new(source, base_url, max_pages)?;
    let mut all_products: Vec<Product> = Vec::new();

    while let Some(products) = paginator.next_page().await? {
        all_products.extend(products);
    }

    derive_product_urls(&mut all_products, paginator.base_url());

    tracing::info!(
        base_url = %paginator.base_url(),
        pages = paginator.pages_fetched(),
        products = all_products.len(),
        "fetched storefront catalog"
    );

    Ok(all_products)
}

/// Sets `url = {base_url}/products/{handle}` on every product.
///
/// `base_url` is expected without a trailing slash (see
/// [`normalize_base_url`]). An empty slice is left untouched.
pub fn derive_product_urls(products: &mut [Product], base_url: &str) {
    if products.is_empty() {
        return;
    }
    let base_url = base_url.trim_end_matches('/');
    for product in products {
        product.url = Some(format!("{base_url}/products/{}", product.handle));
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
