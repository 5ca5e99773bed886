//! HTTP server wiring for the Value Generated API: configuration, CORS and
//! request tracing around [`valgen_api::api_router`].

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, header::InvalidHeaderValue},
};
use serde::Deserialize;
use thiserror::Error;
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};
use valgen_core::Dataset;
use valgen_store_postgres::PostgresConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Prefix of the environment variables layered over the config file.
/// Nested keys are joined with `__`, e.g. `VALGEN_STORE__POSTGRES__PASSWORD`.
pub const ENV_PREFIX: &str = "VALGEN";

/// Runtime server configuration, deserialised from `config.toml` and
/// `VALGEN_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  /// The single browser origin allowed to call the API.
  #[serde(default = "default_cors_origin")]
  pub cors_origin: String,
  pub store:       StoreConfig,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_cors_origin() -> String { "http://localhost:3000".to_owned() }

/// Which backend holds the dataset, and the settings for each. Only the
/// section named by `kind` has to be present.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
  pub kind:     StoreKind,
  pub postgres: Option<PostgresConfig>,
  pub sqlite:   Option<SqliteConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
  Postgres,
  Sqlite,
}

/// A local SQLite snapshot with the same tables as production.
#[derive(Debug, Deserialize, Clone)]
pub struct SqliteConfig {
  pub path: PathBuf,
}

/// The selected backend's settings.
#[derive(Debug, Clone, Copy)]
pub enum Backend<'a> {
  Postgres(&'a PostgresConfig),
  Sqlite(&'a SqliteConfig),
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("store.kind is {0:?} but there is no [store.{1}] section")]
  MissingSection(StoreKind, &'static str),

  #[error(transparent)]
  Load(#[from] config::ConfigError),
}

impl StoreConfig {
  pub fn backend(&self) -> Result<Backend<'_>, ConfigError> {
    match self.kind {
      StoreKind::Postgres => self
        .postgres
        .as_ref()
        .map(Backend::Postgres)
        .ok_or(ConfigError::MissingSection(self.kind, "postgres")),
      StoreKind::Sqlite => self
        .sqlite
        .as_ref()
        .map(Backend::Sqlite)
        .ok_or(ConfigError::MissingSection(self.kind, "sqlite")),
    }
  }
}

/// Layer `VALGEN_*` variables over `file` and deserialise the result. `env`
/// replaces the process environment when given.
pub fn load_config<F>(
  file: F,
  env: Option<config::Map<String, String>>,
) -> Result<ServerConfig, ConfigError>
where
  F: config::Source + Send + Sync + 'static,
{
  let settings = config::Config::builder()
    .add_source(file)
    .add_source(
      config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(env),
    )
    .build()?;
  let server: ServerConfig = settings.try_deserialize()?;
  server.store.backend()?;
  Ok(server)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS for exactly one origin, with credentials. Requests from any other
/// origin get no CORS headers. Methods and headers are mirrored from the
/// request; wildcards cannot be combined with credentials.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list([HeaderValue::from_str(origin)?]))
      .allow_credentials(true)
      .allow_methods(AllowMethods::mirror_request())
      .allow_headers(AllowHeaders::mirror_request()),
  )
}

/// The API router for `dataset` with CORS and request tracing applied.
pub fn app<D>(
  dataset: Arc<D>,
  config: &ServerConfig,
) -> Result<Router, InvalidHeaderValue>
where
  D: Dataset + 'static,
{
  Ok(
    valgen_api::api_router(dataset)
      .layer(cors_layer(&config.cors_origin)?)
      .layer(TraceLayer::new_for_http()),
  )
}
