//! Storefront response types for the public `products.json` endpoint.
//!
//! ## Observed shape from Shopify-style storefronts
//!
//! ### Identities
//! Product and variant IDs are large integers (e.g. `6789012345678`). Some
//! exports and proxies re-encode them as strings (`"6789012345678"`), and a
//! variant's `product_id` is not always encoded the same way as the product's
//! own `id`. Both shapes are normalized into [`CatalogId`] on the way in, so
//! the variant join never compares a string against a number.
//!
//! ### Passthrough fields
//! Storefronts differ in which fields they expose (`tags`, `options`,
//! `body_html`, `published_at`, ...). Only the fields the flattening stages
//! depend on are typed; everything else is kept verbatim in `extra`, in source
//! order, and comes back out in the flattened tables.
//!
//! ### `vendor`
//! Present on every observed store, but may be `null` on custom storefronts.
//! It stays in `extra` so an absent `vendor` is not turned into a `null`
//! column; [`Product::vendor`] reads it from there.
//!
//! ### Optional arrays
//! `variants` and `images` are `Option` so a product that omits them is
//! written back out without them.
//!
//! ### `images`
//! Each image carries store-defined fields (`id`, `src`, `position`,
//! `product_id`, `variant_ids`, `width`, `height`, ...). They are not typed:
//! image rows are emitted exactly as the store sent them.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A flat JSON object: one row of an output table.
pub type Record = Map<String, Value>;

/// An image entry from a product's `images` array.
pub type Image = Record;

/// Canonical integer identity for products and variants.
///
/// Deserializes from a JSON integer, an integral float, or a string holding a
/// base-10 integer. Always serializes as a JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(pub i64);

impl CatalogId {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for CatalogId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CatalogIdVisitor)
    }
}

struct CatalogIdVisitor;

impl Visitor<'_> for CatalogIdVisitor {
    type Value = CatalogId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer identity, as a JSON number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CatalogId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(CatalogId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(CatalogId(v as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim()
            .parse::<i64>()
            .map(CatalogId)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// A single product from the storefront listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: CatalogId,

    /// Display name of the product. Copied onto each variant as `product_title`.
    pub title: String,

    /// URL slug for the product page (e.g., `"sparkling-tonic-12oz"`).
    pub handle: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,

    /// Canonical product page URL, `{base_url}/products/{handle}`. Absent in
    /// the storefront response; filled in once all pages are fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Every other field of the source object, unchanged.
    #[serde(flatten)]
    pub extra: Record,
}

impl Product {
    /// Vendor name, when the source carried it as a string.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.extra.get("vendor").and_then(Value::as_str)
    }

    /// Variants in source order; empty when the field was absent or `null`.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        self.variants.as_deref().unwrap_or_default()
    }

    /// Images in source order; empty when the field was absent or `null`.
    #[must_use]
    pub fn images(&self) -> &[Image] {
        self.images.as_deref().unwrap_or_default()
    }
}

/// A purchasable variant embedded in a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: CatalogId,

    /// Foreign key to [`Product::id`].
    pub product_id: CatalogId,

    #[serde(flatten)]
    pub extra: Record,
}

/// A [`Variant`] with its parent product's attributes attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedVariant {
    #[serde(flatten)]
    pub variant: Variant,

    /// Copied from the parent [`Product::title`].
    pub product_title: String,

    /// Copied from the parent [`Product::vendor()`].
    pub vendor: Option<String>,
}
