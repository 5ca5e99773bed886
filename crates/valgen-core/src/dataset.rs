//! The query-execution seam between report logic and storage backends.
//!
//! A [`Dataset`] is the long-lived, injected handle (typically a connection
//! pool). Each request takes one [`Session`] from it, runs its queries in
//! order on that session, and drops it when done, which returns the
//! underlying connection whether the request succeeded or not.

use std::future::Future;

use crate::{
  record::Row,
  sql::{Dialect, SqlQuery},
};

/// A read-only handle on the dataset.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Dataset: Send + Sync {
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;
  type Session: Session<Error = Self::Error>;

  /// Acquire a session for the duration of one request.
  fn session(
    &self,
  ) -> impl Future<Output = Result<Self::Session, Self::Error>> + Send + '_;
}

/// One acquired connection. Queries run sequentially; no snapshot is shared
/// between them.
pub trait Session: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The SQL dialect queries for this session must be rendered in.
  fn dialect(&self) -> Dialect;

  /// Run a query whose first column of its single row is a count.
  fn fetch_count<'a>(
    &'a mut self,
    query: &'a SqlQuery,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Run a query and return every row, columns keyed by output label.
  fn fetch_rows<'a>(
    &'a mut self,
    query: &'a SqlQuery,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + 'a;
}
