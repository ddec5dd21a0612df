//! jewelry-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `JEWELRY_*` environment variables, builds the catalog, the favorites
//! backend and the email notifier, and serves the JSON API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use jewelry_core::{
  catalog::Catalog,
  favorite::{FavoriteStore, MemoryFavorites},
};
use jewelry_mail::EmailNotifier;
use jewelry_server::{ServerConfig, app, expand_tilde};
use jewelry_store_sqlite::SqliteFavorites;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Jewelry customization storefront server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Mount development-only routes regardless of configuration.
  #[arg(long)]
  dev_routes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let mut server_cfg =
    ServerConfig::load(&cli.config).context("failed to read configuration")?;
  server_cfg.dev_routes |= cli.dev_routes;

  let catalog = Catalog::new(server_cfg.products.clone()).context("invalid product catalog")?;

  let notifier =
    EmailNotifier::new(server_cfg.email.clone()).context("failed to build mail client")?;
  if !notifier.config().is_enabled() {
    tracing::warn!("no mail API key configured; order confirmations will be skipped");
  }

  match &server_cfg.favorites_path {
    Some(path) => {
      let path = expand_tilde(path);
      let store = SqliteFavorites::open(&path)
        .await
        .with_context(|| format!("failed to open favorites store at {path:?}"))?;
      tracing::info!(path = %path.display(), "favorites stored in SQLite");
      serve(&server_cfg, catalog, store, notifier).await
    }
    None => {
      tracing::info!("favorites kept in memory");
      serve(&server_cfg, catalog, MemoryFavorites::new(), notifier).await
    }
  }
}

async fn serve<F>(
  server_cfg: &ServerConfig,
  catalog: Catalog,
  favorites: F,
  notifier: EmailNotifier,
) -> anyhow::Result<()>
where
  F: FavoriteStore + 'static,
{
  let app = app(catalog, favorites, notifier, server_cfg.dev_routes);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
