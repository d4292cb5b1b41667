//! Flattening of per-product arrays into independent rows.

use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::types::{Product, Record};

/// Column name used when an array element is a scalar rather than an object.
pub const SCALAR_COLUMN: &str = "value";

/// Emits every element of the array field `field_name` of every product as
/// its own record, in product order and then array order.
///
/// No parent linkage is added: each record holds exactly the element's own
/// fields. A product whose field is absent, `null`, or an empty array
/// contributes no records. Scalar elements become `{"value": <element>}`.
///
/// # Errors
///
/// - [`ScraperError::NotAnArray`] — the field is present on a product but holds
///   something other than an array or `null`.
/// - [`ScraperError::Encode`] — a typed element could not be re-encoded.
pub fn flatten_array_column(
    products: &[Product],
    field_name: &str,
) -> Result<Vec<Record>, ScraperError> {
    let mut rows = Vec::new();
    for product in products {
        rows.extend(array_field(product, field_name)?.into_iter().map(into_record));
    }
    Ok(rows)
}

/// Returns the image rows of every product.
///
/// Same as `flatten_array_column(products, "images")`.
///
/// # Errors
///
/// See [`flatten_array_column`].
pub fn extract_images(products: &[Product]) -> Result<Vec<Record>, ScraperError> {
    flatten_array_column(products, "images")
}

fn array_field(product: &Product, field_name: &str) -> Result<Vec<Value>, ScraperError> {
    let not_an_array = || ScraperError::NotAnArray {
        field: field_name.to_owned(),
        product_id: product.id,
    };

    match field_name {
        "images" => Ok(product.images().iter().cloned().map(Value::Object).collect()),
        "variants" => product
            .variants()
            .iter()
            .map(|variant| {
                serde_json::to_value(variant).map_err(|source| ScraperError::Encode {
                    context: format!("variant {} of product {}", variant.id, product.id),
                    source,
                })
            })
            .collect(),
        "url" if product.url.is_none() => Ok(Vec::new()),
        "id" | "title" | "handle" | "url" => Err(not_an_array()),
        _ => match product.extra.get(field_name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(not_an_array()),
        },
    }
}

fn into_record(element: Value) -> Record {
    match element {
        Value::Object(fields) => fields,
        scalar => {
            let mut record = Map::new();
            record.insert(SCALAR_COLUMN.to_owned(), scalar);
            record
        }
    }
}
