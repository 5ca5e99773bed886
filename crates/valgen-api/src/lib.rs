//! JSON REST API for the Value Generated dataset.
//!
//! Exposes an axum [`Router`] backed by any [`valgen_core::Dataset`]. Every
//! endpoint is a read-only `GET`. CORS, tracing and transport belong to the
//! caller.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = valgen_api::api_router(Arc::new(store)).layer(cors);
//! ```

pub mod error;
pub mod lookups;
pub mod value_generated;
pub mod value_tools;

use std::sync::Arc;

use axum::{Router, routing::get};
use valgen_core::Dataset;

pub use error::ApiError;

/// Build a fully-materialised API router for `dataset`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<D>(dataset: Arc<D>) -> Router<()>
where
  D: Dataset + 'static,
{
  Router::new()
    .route("/stakeholders", get(lookups::stakeholders::<D>))
    .route("/regions", get(lookups::regions::<D>))
    .route("/value-taxonomy", get(lookups::value_taxonomy::<D>))
    .route("/value-generated", get(value_generated::handler::<D>))
    .route("/value-tools", get(value_tools::handler::<D>))
    .with_state(dataset)
}
