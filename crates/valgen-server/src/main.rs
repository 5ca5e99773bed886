//! valgen-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `VALGEN_*` environment variables, connects to the configured dataset, and
//! serves the JSON API over HTTP.
//!
//! Nested keys use a double underscore, e.g.
//! `VALGEN_STORE__POSTGRES__PASSWORD`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use valgen_core::Dataset;
use valgen_server::{Backend, ServerConfig};
use valgen_store_postgres::PgStore;
use valgen_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Value Generated reporting API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = valgen_server::load_config(
    config::File::from(cli.config).required(false),
    None,
  )
  .context("failed to load configuration")?;

  match server_cfg.store.backend()? {
    Backend::Postgres(pg) => {
      let store = PgStore::connect(pg).await.with_context(|| {
        format!("failed to connect to postgres at {}:{}", pg.host, pg.port)
      })?;
      serve(store, &server_cfg).await
    }
    Backend::Sqlite(sqlite) => {
      let path = &sqlite.path;
      let store = SqliteStore::open(path)
        .await
        .with_context(|| format!("failed to open snapshot at {path:?}"))?;
      tracing::info!(path = %path.display(), "opened sqlite dataset");
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<D>(dataset: D, config: &ServerConfig) -> anyhow::Result<()>
where
  D: Dataset + 'static,
{
  let app = valgen_server::app(Arc::new(dataset), config)
    .with_context(|| format!("invalid cors_origin {:?}", config.cors_origin))?;
  let address = format!("{}:{}", config.host, config.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
