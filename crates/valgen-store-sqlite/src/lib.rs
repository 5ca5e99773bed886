//! SQLite backend for the Value Generated dataset.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Used for local development against a
//! copy of the dataset and as the test backend.

mod functions;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::SCHEMA;
pub use store::{SqliteSession, SqliteStore};

#[cfg(test)]
mod tests;
