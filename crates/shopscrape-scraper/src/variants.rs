//! Variant extraction and the join back to parent products.

use std::collections::HashMap;

use crate::error::ScraperError;
use crate::types::{CatalogId, JoinedVariant, Product};

/// Emits every variant of every product, joined to its parent product.
///
/// Variants keep product order and then array order. Each one is matched to
/// the product whose `id` equals its `product_id` (both normalized to
/// [`CatalogId`] at parse time) and gains that product's `title` as
/// `product_title` and its `vendor`. The match is on `product_id`, not on
/// which array the variant was found in.
///
/// # Errors
///
/// Returns [`ScraperError::JoinIntegrity`] for the first variant whose
/// `product_id` matches no product, or more than one product, in `products`.
/// No partial result is returned.
pub fn extract_variants(products: &[Product]) -> Result<Vec<JoinedVariant>, ScraperError> {
    let mut parents: HashMap<CatalogId, (usize, &Product)> = HashMap::with_capacity(products.len());
    for product in products {
        parents
            .entry(product.id)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, product));
    }

    let total: usize = products.iter().map(|p| p.variants().len()).sum();
    let mut joined = Vec::with_capacity(total);

    for variant in products.iter().flat_map(Product::variants) {
        let parent = match parents.get(&variant.product_id) {
            Some((1, parent)) => *parent,
            other => {
                let matches = other.map_or(0, |(count, _)| *count);
                tracing::warn!(
                    variant_id = %variant.id,
                    product_id = %variant.product_id,
                    matches,
                    "variant does not match exactly one product"
                );
                return Err(ScraperError::JoinIntegrity {
                    variant_id: variant.id,
                    product_id: variant.product_id,
                    matches,
                });
            }
        };

        let mut variant = variant.clone();
        // The joined columns replace any same-named source fields.
        variant.extra.remove("product_title");
        variant.extra.remove("vendor");

        joined.push(JoinedVariant {
            variant,
            product_title: parent.title.clone(),
            vendor: parent.vendor().map(str::to_owned),
        });
    }

    Ok(joined)
}
