//! Vitrine CLI
//!
//! Loads a gallery manifest, renders it the way the page scripts would and
//! prints the resulting document.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitrine_core::Config;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Render manifest-driven image galleries to HTML")]
#[command(version)]
#[command(after_help = "\
Examples:
  vitrine tabs --base https://example.com/photos/
  vitrine tabs --page index.html --select Holidays
  vitrine lazy --manifest gallery.json --visible 4

Set RUST_LOG=debug for per-image logging.")]
struct Cli {
    /// URL of the hosting page; relative manifest URLs resolve against it
    #[arg(long, global = true, default_value = "http://localhost:8000/")]
    base: String,

    /// Hosting page markup; its script tag may carry `data-json-url`
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    /// Manifest URL, overrides the page attribute
    #[arg(long, global = true)]
    manifest: Option<String>,

    /// Image directory prefix
    #[arg(long, global = true)]
    image_root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One tab per gallery, first gallery rendered
    Tabs {
        /// Gallery to select after the tabs are built
        #[arg(long)]
        select: Option<String>,
    },

    /// All folders in one lazily loaded gallery
    Lazy {
        /// Number of leading images to report as visible and loaded
        #[arg(long, default_value_t = 0)]
        visible: usize,
    },
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.page {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page {}", path.display()))?;
            Config::from_page_html(&html, cli.base.clone())?
        }
        None => Config::new(cli.base.clone()),
    };

    if let Some(manifest) = &cli.manifest {
        config.manifest_url = manifest.clone();
    }
    if let Some(root) = &cli.image_root {
        config.image_root = root.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    vitrine_core::init_logging();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(manifest = %config.manifest_url, base = %config.base_url, "Resolved config");

    let html = match cli.command {
        Commands::Tabs { select } => render::render_tabs(&config, select.as_deref()).await?,
        Commands::Lazy { visible } => render::render_lazy(&config, visible).await?,
    };

    println!("{html}");
    Ok(())
}
