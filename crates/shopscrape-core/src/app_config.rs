use std::path::PathBuf;

/// Runtime settings for a catalog export, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Per-request timeout for each `products.json` page fetch.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Safety cap on the number of pages requested from one storefront.
    pub max_pages: u32,
    pub log_level: String,
    /// Directory the CLI writes `products.jsonl`, `variants.jsonl` and
    /// `images.jsonl` into.
    pub out_dir: PathBuf,
}
