//! Handler for `GET /value-tools`.

use std::sync::Arc;

use axum::{Json, extract::State};
use valgen_core::{Dataset, record::ValueTool, report};

use crate::error::ApiError;

/// `GET /value-tools`: every fact, unpaginated and unfiltered.
pub async fn handler<D: Dataset>(
  State(dataset): State<Arc<D>>,
) -> Result<Json<Vec<ValueTool>>, ApiError> {
  let tools = report::value_tools(dataset.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(tools))
}
