//! Postgres backend for the Value Generated dataset.
//!
//! The production dataset lives in Postgres and is written by an external
//! data-entry tool; this crate only reads from it, through a [`sqlx`] pool.

mod config;
mod store;

pub mod error;

pub use config::PostgresConfig;
pub use error::{Error, Result};
pub use store::{PgSession, PgStore};
