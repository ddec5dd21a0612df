//! Composition root for the jewelry storefront server.
//!
//! Holds the runtime configuration and assembles the HTTP application from a
//! favorites backend and a notifier. The binary in `main.rs` decides which
//! backend to use and serves the result.

use std::path::{Path, PathBuf};

use axum::Router;
use jewelry_api::AppState;
use jewelry_core::{
  catalog::{Catalog, Product},
  favorite::FavoriteStore,
  order::Notifier,
};
use jewelry_mail::EmailConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `JEWELRY_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  /// SQLite file for favorites. In-memory favorites when absent.
  #[serde(default)]
  pub favorites_path: Option<PathBuf>,
  /// Mount `POST /test-email`.
  #[serde(default)]
  pub dev_routes:     bool,
  #[serde(default)]
  pub email:          EmailConfig,
  #[serde(default = "Catalog::default_products")]
  pub products:       Vec<Product>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5001 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      favorites_path: None,
      dev_routes:     false,
      email:          EmailConfig::default(),
      products:       Catalog::default_products(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Load from an optional TOML file layered under the environment.
  ///
  /// Environment keys take the `JEWELRY_` prefix and use `__` for nesting,
  /// e.g. `JEWELRY_EMAIL__API_KEY`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("JEWELRY")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Wire the API router over `favorites` and `notifier`, with request tracing.
pub fn app<F, N>(catalog: Catalog, favorites: F, notifier: N, dev_routes: bool) -> Router
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let state = AppState::new(catalog, favorites, notifier);
  jewelry_api::api_router(state, dev_routes).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use config::{Config, File, FileFormat};
  use jewelry_core::catalog::ProductCategory;
  use rust_decimal::Decimal;

  use super::*;

  fn from_toml(src: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(src, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "127.0.0.1:5001");
    assert!(cfg.favorites_path.is_none());
    assert!(!cfg.dev_routes);
    assert!(!cfg.email.is_enabled());
    assert_eq!(cfg.email.from_name, "Ryan H Jewelry Co.");
    assert_eq!(cfg.products, Catalog::default_products());
  }

  #[test]
  fn file_overrides_fields() {
    let cfg = from_toml(
      r#"
        port = 8080
        favorites_path = "/tmp/favorites.db"
        dev_routes = true

        [email]
        api_key = "SG.test"

        [[products]]
        id = 7
        name = "Bracelet Ring"
        base_price = 99.5
        category = "ring"
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.favorites_path, Some(PathBuf::from("/tmp/favorites.db")));
    assert!(cfg.dev_routes);
    assert!(cfg.email.is_enabled());
    assert_eq!(cfg.products.len(), 1);
    assert_eq!(cfg.products[0].category, ProductCategory::Ring);
    assert_eq!(cfg.products[0].base_price, Decimal::new(995, 1));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/favorites.db")),
      PathBuf::from(home).join("favorites.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
