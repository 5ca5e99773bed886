//! Handlers for the unparameterised lookup lists.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stakeholders` | Sorted by segment |
//! | `GET`  | `/regions` | Sorted by detail, "Russia & Belarus" omitted |
//! | `GET`  | `/value-taxonomy` | One item per category/cluster pairing |

use std::sync::Arc;

use axum::{Json, extract::State};
use valgen_core::{
  Dataset,
  record::{RegionListing, Stakeholder, TaxonomyEntry},
  report,
};

use crate::error::ApiError;

/// `GET /stakeholders`
pub async fn stakeholders<D: Dataset>(
  State(dataset): State<Arc<D>>,
) -> Result<Json<Vec<Stakeholder>>, ApiError> {
  let list = report::stakeholders(dataset.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(list))
}

/// `GET /regions`
pub async fn regions<D: Dataset>(
  State(dataset): State<Arc<D>>,
) -> Result<Json<Vec<RegionListing>>, ApiError> {
  let list = report::regions(dataset.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(list))
}

/// `GET /value-taxonomy`
pub async fn value_taxonomy<D: Dataset>(
  State(dataset): State<Arc<D>>,
) -> Result<Json<Vec<TaxonomyEntry>>, ApiError> {
  let list = report::value_taxonomy(dataset.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(list))
}
