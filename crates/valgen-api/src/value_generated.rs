//! Handler for `GET /value-generated`.
//!
//! Filter params may repeat (`values=a&values=b`), carry comma-joined lists
//! (`values=a,b`), or use the bracketed spelling (`values[]=a`). All three
//! forms combine. `paginationCounter` and `limit` must be integers; the last
//! occurrence wins.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use valgen_core::{
  Dataset,
  filter::ValueFilters,
  page::{DEFAULT_PAGE_SIZE, Page, PageRequest},
  record::ValueGeneratedRow,
  report,
};

use crate::error::ApiError;

/// Raw query parameters, collected before any validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueGeneratedParams {
  pub pagination_counter: Option<String>,
  pub limit:              Option<String>,
  pub values:             Vec<String>,
  pub regions:            Vec<String>,
  pub stakeholders:       Vec<String>,
}

impl ValueGeneratedParams {
  /// Sort decoded `key=value` pairs into their fields. Unknown keys are
  /// ignored.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      match key.strip_suffix("[]").unwrap_or(&key) {
        "paginationCounter" => params.pagination_counter = Some(value),
        "limit" => params.limit = Some(value),
        "values" => params.values.push(value),
        "regions" => params.regions.push(value),
        "stakeholders" => params.stakeholders.push(value),
        _ => {}
      }
    }
    params
  }

  pub fn page_request(&self) -> Result<PageRequest, ApiError> {
    let counter =
      parse_int("paginationCounter", self.pagination_counter.as_deref())?
        .unwrap_or(0);
    let limit = parse_int("limit", self.limit.as_deref())?
      .unwrap_or(DEFAULT_PAGE_SIZE as i64);
    PageRequest::new(counter, limit)
      .map_err(|e| ApiError::BadRequest(e.to_string()))
  }

  pub fn filters(&self) -> ValueFilters {
    ValueFilters::from_raw(&self.values, &self.regions, &self.stakeholders)
  }
}

/// An empty value counts as absent.
fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => s.parse().map(Some).map_err(|_| {
      ApiError::BadRequest(format!("{name} must be an integer, got {s:?}"))
    }),
  }
}

/// `GET /value-generated[?paginationCounter=..][&limit=..][&values=..][&regions=..][&stakeholders=..]`
pub async fn handler<D: Dataset>(
  State(dataset): State<Arc<D>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<ValueGeneratedRow>>, ApiError> {
  let params = ValueGeneratedParams::from_pairs(pairs);
  let page = params.page_request()?;
  let filters = params.filters();

  let result = report::value_generated(dataset.as_ref(), &filters, page)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(result))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect()
  }

  #[test]
  fn bracketed_and_plain_keys_combine() {
    let params = ValueGeneratedParams::from_pairs(pairs(&[
      ("values[]", "Revenue"),
      ("values", "Cost reduction,Sustainability"),
      ("regions", "Europe"),
      ("unrelated", "x"),
    ]));
    let filters = params.filters();
    assert_eq!(filters.values, [
      "Revenue",
      "Cost reduction",
      "Sustainability"
    ]);
    assert_eq!(filters.regions, ["Europe"]);
    assert!(filters.stakeholders.is_empty());
  }

  #[test]
  fn pagination_defaults() {
    let page = ValueGeneratedParams::default().page_request().unwrap();
    assert_eq!(page, PageRequest::default());
  }

  #[test]
  fn blank_pagination_values_are_absent() {
    let params = ValueGeneratedParams::from_pairs(pairs(&[
      ("paginationCounter", ""),
      ("limit", " "),
    ]));
    assert_eq!(params.page_request().unwrap(), PageRequest::default());
  }

  #[test]
  fn last_pagination_value_wins() {
    let params = ValueGeneratedParams::from_pairs(pairs(&[
      ("paginationCounter", "1"),
      ("paginationCounter", "2"),
      ("limit", "10"),
    ]));
    let page = params.page_request().unwrap();
    assert_eq!(page.pagination_counter, 2);
    assert_eq!(page.limit, 10);
  }

  #[test]
  fn non_integer_pagination_is_rejected() {
    let params =
      ValueGeneratedParams::from_pairs(pairs(&[("limit", "thirty")]));
    let err = params.page_request().unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(m) if m.contains("limit")));
  }

  #[test]
  fn out_of_range_pagination_is_rejected() {
    for raw in [("paginationCounter", "-1"), ("limit", "0")] {
      let params = ValueGeneratedParams::from_pairs(pairs(&[raw]));
      assert!(matches!(params.page_request(), Err(ApiError::BadRequest(_))));
    }
  }
}
