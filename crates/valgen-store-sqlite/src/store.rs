//! [`SqliteStore`], the SQLite implementation of [`Dataset`].

use std::{path::Path, rc::Rc};

use rusqlite::{
  OpenFlags, ToSql,
  types::{Type, ValueRef},
};
use valgen_core::{
  dataset::{Dataset, Session},
  record::Row,
  sql::{Dialect, Param, SqlQuery},
};

use crate::{Error, Result, functions, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A dataset held in a single SQLite file.
///
/// Clones share the one background connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open an existing snapshot at `path`, read-only. A missing file is an
  /// error; the schema is not created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await?;
    conn
      .call(|conn| {
        functions::register(conn)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  /// Open an empty, writable in-memory dataset with the schema created, for
  /// tests and fixtures.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  async fn init(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        functions::register(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a batch of SQL statements, e.g. a data snapshot or a test fixture.
  pub async fn execute_batch(&self, sql: impl Into<String>) -> Result<()> {
    let sql = sql.into();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl Dataset for SqliteStore {
  type Error = Error;
  type Session = SqliteSession;

  async fn session(&self) -> Result<SqliteSession> {
    Ok(SqliteSession { conn: self.conn.clone() })
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One request's view of the store. SQLite serialises access on the single
/// background connection, so a session is just another handle to it.
pub struct SqliteSession {
  conn: tokio_rusqlite::Connection,
}

/// Convert core parameters into rusqlite values. Lists become `rarray`
/// arguments.
fn bind(params: Vec<Param>) -> Vec<Box<dyn ToSql>> {
  params
    .into_iter()
    .map(|p| -> Box<dyn ToSql> {
      match p {
        Param::Text(s) => Box::new(s),
        Param::Int(i) => Box::new(i),
        Param::TextList(list) => {
          let values: Vec<rusqlite::types::Value> =
            list.into_iter().map(rusqlite::types::Value::from).collect();
          Box::new(Rc::new(values))
        }
      }
    })
    .collect()
}

/// Decode a column as text for [`Row`]. Numbers are rendered; blobs are a
/// decode error.
fn text(
  value: ValueRef<'_>,
  idx: usize,
  name: &str,
) -> rusqlite::Result<Option<String>> {
  match value {
    ValueRef::Null => Ok(None),
    ValueRef::Integer(i) => Ok(Some(i.to_string())),
    ValueRef::Real(f) => Ok(Some(f.to_string())),
    ValueRef::Text(b) => Ok(Some(String::from_utf8_lossy(b).into_owned())),
    ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
      idx,
      name.to_owned(),
      Type::Blob,
    )),
  }
}

impl Session for SqliteSession {
  type Error = Error;

  fn dialect(&self) -> Dialect { Dialect::Sqlite }

  async fn fetch_count(&mut self, query: &SqlQuery) -> Result<u64> {
    tracing::debug!(sql = %query.sql, "sqlite count");
    let sql = query.sql.clone();
    let params = query.params.clone();

    let count: i64 = self
      .conn
      .call(move |conn| {
        let bound = bind(params);
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(bound.iter()),
          |row| row.get(0),
        )?)
      })
      .await?;

    u64::try_from(count).map_err(|_| Error::NegativeCount(count))
  }

  async fn fetch_rows(&mut self, query: &SqlQuery) -> Result<Vec<Row>> {
    tracing::debug!(sql = %query.sql, "sqlite rows");
    let sql = query.sql.clone();
    let params = query.params.clone();

    let rows: Vec<Row> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> =
          stmt.column_names().into_iter().map(str::to_owned).collect();
        let bound = bind(params);

        let rows = stmt
          .query_map(rusqlite::params_from_iter(bound.iter()), |r| {
            let mut row = Row::new();
            for (i, name) in names.iter().enumerate() {
              row.push(name.clone(), text(r.get_ref(i)?, i, name)?);
            }
            Ok(row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
