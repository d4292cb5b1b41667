//! Assembly of the products, variants, and images tables.

use crate::error::ScraperError;
use crate::flatten::extract_images;
use crate::pagination::{fetch_all_products, PageSource};
use crate::table::Table;
use crate::types::Product;
use crate::variants::extract_variants;

/// The three tables produced from one storefront catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTables {
    /// One row per product: every source field plus the derived `url`.
    pub products: Table,
    /// One row per variant: every source field plus `product_title` and `vendor`.
    pub variants: Table,
    /// One row per image, exactly as the store sent it.
    pub images: Table,
}

impl CatalogTables {
    /// Flattens and tabulates an already fetched product list.
    ///
    /// # Errors
    ///
    /// Propagates [`ScraperError::JoinIntegrity`] from the variant join and
    /// any encoding error from building the tables.
    pub fn from_products(products: &[Product]) -> Result<Self, ScraperError> {
        let variants = extract_variants(products)?;
        let images = extract_images(products)?;

        Ok(Self {
            products: Table::from_records(products)?,
            variants: Table::from_records(&variants)?,
            images: Table::from_rows(images),
        })
    }
}

/// Fetches a storefront's whole catalog and returns it as three tables.
///
/// # Errors
///
/// Propagates any error from [`fetch_all_products`] or
/// [`CatalogTables::from_products`].
pub async fn scrape_catalog<S: PageSource>(
    source: &S,
    base_url: &str,
    max_pages: u32,
) -> Result<CatalogTables, ScraperError> {
    let products = fetch_all_products(source, base_url, max_pages).await?;
    let tables = CatalogTables::from_products(&products)?;

    tracing::info!(
        base_url,
        products = tables.products.len(),
        variants = tables.variants.len(),
        images = tables.images.len(),
        "assembled catalog tables"
    );

    Ok(tables)
}
