//! Error types for `valgen-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("page index must not be negative: {0}")]
  NegativePageIndex(i64),

  #[error("page size must be positive: {0}")]
  NonPositiveLimit(i64),

  #[error("result row has no column {0:?}")]
  MissingColumn(String),

  #[error("column {0:?} is unexpectedly null")]
  NullColumn(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
