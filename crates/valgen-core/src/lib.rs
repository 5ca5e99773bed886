//! Core types and query composition for the Value Generated reporting API.
//!
//! This crate has no HTTP and database dependencies. It
//! builds SQL for a fixed dataset shape, and hands it to a [`Dataset`]
//! backend for execution.

pub mod dataset;
pub mod error;
pub mod filter;
pub mod page;
pub mod query;
pub mod record;
pub mod report;
pub mod schema;
pub mod sql;

pub use dataset::{Dataset, Session};
pub use error::{Error, Result};
