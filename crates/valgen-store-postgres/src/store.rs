//! [`PgStore`], the Postgres implementation of [`Dataset`].

use sqlx::{
  Column as _, PgPool, Postgres, Row as _,
  pool::PoolConnection,
  postgres::{PgArguments, PgPoolOptions, PgRow},
  query::Query,
};
use valgen_core::{
  dataset::{Dataset, Session},
  record::Row,
  sql::{Dialect, Param, SqlQuery},
};

use crate::{Error, PostgresConfig, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A pooled, read-only handle on the production dataset.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  /// Open a pool using `config`. Fails if the first connection cannot be
  /// established.
  pub async fn connect(config: &PostgresConfig) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(config.acquire_timeout())
      .connect_with(config.connect_options())
      .await?;

    tracing::info!(
      host = %config.host,
      database = %config.name,
      schema = %config.schema,
      "connected to postgres"
    );
    Ok(Self { pool })
  }

  pub fn from_pool(pool: PgPool) -> Self { Self { pool } }

  pub fn pool(&self) -> &PgPool { &self.pool }
}

impl Dataset for PgStore {
  type Error = Error;
  type Session = PgSession;

  async fn session(&self) -> Result<PgSession> {
    let conn = self.pool.acquire().await?;
    Ok(PgSession { conn })
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One pooled connection, returned to the pool on drop.
pub struct PgSession {
  conn: PoolConnection<Postgres>,
}

fn bind(query: &SqlQuery) -> Query<'_, Postgres, PgArguments> {
  query
    .params
    .iter()
    .fold(sqlx::query(&query.sql), |q, p| match p {
      Param::Text(s) => q.bind(s.clone()),
      Param::TextList(list) => q.bind(list.clone()),
      Param::Int(i) => q.bind(*i),
    })
}

/// Decode a column as text for [`Row`]. Integers are rendered; any other
/// type is a decode error.
fn text(row: &PgRow, idx: usize) -> Result<Option<String>> {
  if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
    return Ok(v);
  }
  if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
    return Ok(v.map(|i| i.to_string()));
  }
  let v = row.try_get::<Option<i32>, _>(idx)?;
  Ok(v.map(|i| i.to_string()))
}

impl Session for PgSession {
  type Error = Error;

  fn dialect(&self) -> Dialect { Dialect::Postgres }

  async fn fetch_count(&mut self, query: &SqlQuery) -> Result<u64> {
    tracing::debug!(sql = %query.sql, "postgres count");
    let row = bind(query).fetch_one(&mut *self.conn).await?;
    let count: i64 = row.try_get(0)?;
    u64::try_from(count).map_err(|_| Error::NegativeCount(count))
  }

  async fn fetch_rows(&mut self, query: &SqlQuery) -> Result<Vec<Row>> {
    tracing::debug!(sql = %query.sql, "postgres rows");
    let pg_rows = bind(query).fetch_all(&mut *self.conn).await?;

    pg_rows
      .iter()
      .map(|pg| -> Result<Row> {
        let mut row = Row::new();
        for (i, column) in pg.columns().iter().enumerate() {
          row.push(column.name(), text(pg, i)?);
        }
        Ok(row)
      })
      .collect()
  }
}
