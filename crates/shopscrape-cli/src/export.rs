//! `export` and `show` command handlers.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use shopscrape_core::AppConfig;
use shopscrape_scraper::{CatalogTables, StorefrontClient, Table};

use crate::{FetchArgs, TableKind};

/// Applies command-line flags on top of the environment configuration.
pub(crate) fn apply_overrides(
    mut config: AppConfig,
    fetch: &FetchArgs,
    out_dir: Option<PathBuf>,
) -> AppConfig {
    if let Some(max_pages) = fetch.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(timeout_secs) = fetch.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }
    if let Some(user_agent) = &fetch.user_agent {
        config.user_agent.clone_from(user_agent);
    }
    if let Some(out_dir) = out_dir {
        config.out_dir = out_dir;
    }
    config
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    anyhow::ensure!(config.max_pages > 0, "--max-pages must be greater than zero");
    anyhow::ensure!(
        config.request_timeout_secs > 0,
        "--timeout-secs must be greater than zero"
    );
    StorefrontClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_pages,
    )
    .context("failed to build storefront client")
}

async fn scrape(config: &AppConfig, base_url: &str) -> anyhow::Result<CatalogTables> {
    let client = build_client(config)?;
    client
        .scrape_catalog(base_url)
        .await
        .with_context(|| format!("failed to export catalog from {base_url}"))
}

pub(crate) async fn run_export(config: &AppConfig, base_url: &str) -> anyhow::Result<()> {
    let tables = scrape(config, base_url).await?;
    write_tables(&config.out_dir, &tables)?;

    println!(
        "exported {} products, {} variants, {} images to {}",
        tables.products.len(),
        tables.variants.len(),
        tables.images.len(),
        config.out_dir.display()
    );
    Ok(())
}

pub(crate) async fn run_show(
    config: &AppConfig,
    base_url: &str,
    kind: TableKind,
) -> anyhow::Result<()> {
    let tables = scrape(config, base_url).await?;
    let stdout = io::stdout();
    select(&tables, kind)
        .write_json_lines(stdout.lock())
        .context("failed to write table to stdout")
}

fn select(tables: &CatalogTables, kind: TableKind) -> &Table {
    match kind {
        TableKind::Products => &tables.products,
        TableKind::Variants => &tables.variants,
        TableKind::Images => &tables.images,
    }
}

/// Writes `products.jsonl`, `variants.jsonl`, and `images.jsonl` into `dir`,
/// creating it if needed. Empty tables produce empty files.
pub(crate) fn write_tables(dir: &Path, tables: &CatalogTables) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    for kind in [TableKind::Products, TableKind::Variants, TableKind::Images] {
        let path = dir.join(file_name(kind));
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        select(tables, kind)
            .write_json_lines(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote table");
    }
    Ok(())
}

fn file_name(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Products => "products.jsonl",
        TableKind::Variants => "variants.jsonl",
        TableKind::Images => "images.jsonl",
    }
}
