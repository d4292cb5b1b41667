pub mod catalog;
pub mod client;
pub mod error;
pub mod flatten;
pub mod pagination;
pub mod table;
pub mod types;
pub mod variants;

#[cfg(test)]
mod test_support;

pub use catalog::{scrape_catalog, CatalogTables};
pub use client::{normalize_base_url, StorefrontClient, PAGE_SIZE};
pub use error::ScraperError;
pub use flatten::{extract_images, flatten_array_column};
pub use pagination::{fetch_all_products, parse_products_page, PageSource, Paginator};
pub use table::Table;
pub use types::{CatalogId, Image, JoinedVariant, Product, Record, Variant};
pub use variants::extract_variants;
