mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopscrape")]
#[command(about = "Export a storefront's products.json catalog as flat tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the whole catalog and write products, variants, and images tables
    Export {
        /// Storefront base URL, e.g. `https://shop.example`
        base_url: String,
        /// Output directory (defaults to `SHOPSCRAPE_OUT_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Fetch the whole catalog and print one table as JSON lines to stdout
    Show {
        base_url: String,
        #[arg(value_enum)]
        table: TableKind,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Overrides for the environment-derived fetch settings.
#[derive(Debug, Clone, Default, clap::Args)]
struct FetchArgs {
    /// Maximum number of page requests
    #[arg(long)]
    max_pages: Option<u32>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// `User-Agent` header sent with every page request
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TableKind {
    Products,
    Variants,
    Images,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopscrape_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            base_url,
            out_dir,
            fetch,
        } => {
            let config = export::apply_overrides(config, &fetch, out_dir);
            export::run_export(&config, &base_url).await
        }
        Commands::Show {
            base_url,
            table,
            fetch,
        } => {
            let config = export::apply_overrides(config, &fetch, None);
            export::run_show(&config, &base_url, table).await
        }
    }
}
