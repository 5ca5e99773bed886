//! Connection settings.

use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use valgen_core::schema::SCHEMA;

/// Where the dataset lives and how many connections to keep open to it.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  /// Database name.
  pub name:                 String,
  pub user:                 String,
  #[serde(default)]
  pub password:             String,
  /// Schema put first on the `search_path` of every connection.
  #[serde(default = "default_schema")]
  pub schema:               String,
  #[serde(default = "default_max_connections")]
  pub max_connections:      u32,
  #[serde(default = "default_acquire_timeout_secs")]
  pub acquire_timeout_secs: u64,
}

fn default_port() -> u16 { 5432 }

fn default_schema() -> String { SCHEMA.to_owned() }

fn default_max_connections() -> u32 { 10 }

fn default_acquire_timeout_secs() -> u64 { 30 }

impl PostgresConfig {
  pub fn connect_options(&self) -> PgConnectOptions {
    PgConnectOptions::new()
      .host(&self.host)
      .port(self.port)
      .database(&self.name)
      .username(&self.user)
      .password(&self.password)
      .options([("search_path", self.schema.as_str())])
  }

  pub fn acquire_timeout(&self) -> Duration {
    Duration::from_secs(self.acquire_timeout_secs)
  }
}
