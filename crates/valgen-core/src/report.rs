//! The report operations behind each endpoint.
//!
//! Each operation takes one session from the dataset, renders its queries in
//! the session's dialect, and decodes the rows into records.

use crate::{
  dataset::{Dataset, Session},
  filter::ValueFilters,
  page::{Page, PageInfo, PageRequest},
  query,
  record::{
    FromRow, RegionListing, Row, Stakeholder, TaxonomyEntry, ValueGeneratedRow,
    ValueTool,
  },
  sql::{Dialect, SqlQuery},
};

fn decode<R: FromRow>(rows: Vec<Row>) -> crate::Result<Vec<R>> {
  rows.into_iter().map(R::from_row).collect()
}

async fn list<D, R>(
  dataset: &D,
  build: fn(Dialect) -> SqlQuery,
) -> Result<Vec<R>, D::Error>
where
  D: Dataset,
  R: FromRow,
{
  let mut session = dataset.session().await?;
  let query = build(session.dialect());
  let rows = session.fetch_rows(&query).await?;
  Ok(decode(rows)?)
}

/// `GET /stakeholders`
pub async fn stakeholders<D: Dataset>(
  dataset: &D,
) -> Result<Vec<Stakeholder>, D::Error> {
  list(dataset, query::stakeholders).await
}

/// `GET /regions`
pub async fn regions<D: Dataset>(
  dataset: &D,
) -> Result<Vec<RegionListing>, D::Error> {
  list(dataset, query::regions).await
}

/// `GET /value-taxonomy`
pub async fn value_taxonomy<D: Dataset>(
  dataset: &D,
) -> Result<Vec<TaxonomyEntry>, D::Error> {
  list(dataset, query::value_taxonomy).await
}

/// `GET /value-tools`
pub async fn value_tools<D: Dataset>(
  dataset: &D,
) -> Result<Vec<ValueTool>, D::Error> {
  list(dataset, query::value_tools).await
}

/// `GET /value-generated`: count every matching fact row, then fetch the
/// requested page, both on the same session.
///
/// The two queries are not wrapped in a transaction; a write landing between
/// them can make `total_rows` disagree slightly with the page.
pub async fn value_generated<D: Dataset>(
  dataset: &D,
  filters: &ValueFilters,
  page: PageRequest,
) -> Result<Page<ValueGeneratedRow>, D::Error> {
  let mut session = dataset.session().await?;
  let dialect = session.dialect();

  let count = query::count_value_generated(dialect, filters);
  let total_rows = session.fetch_count(&count).await?;

  let rows_query = query::value_generated_page(dialect, filters, page);
  let rows = session.fetch_rows(&rows_query).await?;
  let data: Vec<ValueGeneratedRow> = decode(rows)?;

  let page_info = PageInfo::derive(page, data.len(), total_rows);
  Ok(Page { data, page_info })
}
