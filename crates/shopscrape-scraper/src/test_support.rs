//! In-memory page source and JSON fixtures shared by unit tests.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::error::ScraperError;
use crate::pagination::PageSource;

/// Serves canned page bodies by page number and records every request.
///
/// Pages past the end of `pages` are served as an empty listing, and the
/// optional `failing_page` returns an `UnexpectedStatus` error instead.
pub(crate) struct FakeSource {
    pages: Vec<String>,
    failing_page: Option<u32>,
    endless: bool,
    requests: Mutex<Vec<(String, u32)>>,
}

impl FakeSource {
    pub(crate) fn new(pages: Vec<Value>) -> Self {
        Self {
            pages: pages.iter().map(Value::to_string).collect(),
            failing_page: None,
            endless: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn from_raw(pages: Vec<&str>) -> Self {
        Self {
            pages: pages.into_iter().map(str::to_owned).collect(),
            failing_page: None,
            endless: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every page, forever, holds one product.
    pub(crate) fn endless() -> Self {
        Self {
            endless: true,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn failing_at(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, page)| *page)
            .collect()
    }

    pub(crate) fn requested_base_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(base, _)| base.clone())
            .collect()
    }
}

impl PageSource for FakeSource {
    async fn fetch_page(&self, base_url: &str, page: u32) -> Result<String, ScraperError> {
        self.requests
            .lock()
            .unwrap()
            .push((base_url.to_owned(), page));

        if self.failing_page == Some(page) {
            return Err(ScraperError::UnexpectedStatus {
                status: 503,
                url: format!("{base_url}/products.json?limit=250&page={page}"),
            });
        }
        if self.endless {
            let id = i64::from(page);
            return Ok(page_json(vec![product_json(id, &format!("p-{id}"), vec![], vec![])]).to_string());
        }

        let index = usize::try_from(page - 1).unwrap();
        Ok(self
            .pages
            .get(index)
            .cloned()
            .unwrap_or_else(|| page_json(vec![]).to_string()))
    }
}

pub(crate) fn page_json(products: Vec<Value>) -> Value {
    json!({ "products": products })
}

pub(crate) fn product_json(id: i64, handle: &str, variants: Vec<Value>, images: Vec<Value>) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "handle": handle,
        "vendor": format!("Vendor {id}"),
        "product_type": "Beverages",
        "tags": ["test"],
        "variants": variants,
        "images": images
    })
}

pub(crate) fn variant_json(id: i64, product_id: i64) -> Value {
    json!({
        "id": id,
        "product_id": product_id,
        "title": format!("Variant {id}"),
        "price": "12.99",
        "sku": format!("SKU-{id}"),
        "available": true
    })
}

pub(crate) fn image_json(id: i64, product_id: i64, position: i64) -> Value {
    json!({
        "id": id,
        "product_id": product_id,
        "position": position,
        "src": format!("https://cdn.example/{id}.jpg"),
        "variant_ids": []
    })
}
