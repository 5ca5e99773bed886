//! Integration tests for `SqliteStore` against an in-memory database loaded
//! with `fixtures/sample.sql`.

use valgen_core::{
  Dataset, Session,
  filter::ValueFilters,
  page::PageRequest,
  report,
  sql::SqlQuery,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.execute_batch(include_str!("../fixtures/sample.sql"))
    .await
    .expect("fixture");
  s
}

fn filters(values: &[&str], regions: &[&str], stakeholders: &[&str]) -> ValueFilters {
  ValueFilters::from_raw(values, regions, stakeholders)
}

fn page(counter: i64, limit: i64) -> PageRequest {
  PageRequest::new(counter, limit).unwrap()
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stakeholders_sorted_by_segment() {
  let s = store().await;
  let list = report::stakeholders(&s).await.unwrap();
  let segments: Vec<_> = list.iter().map(|s| s.segment.as_str()).collect();
  assert_eq!(segments, ["Private sector", "Public sector"]);
  assert_eq!(list[0].id_segment, "s2");
}

#[tokio::test]
async fn regions_sorted_and_exclude_russia_belarus() {
  let s = store().await;
  let list = report::regions(&s).await.unwrap();
  let details: Vec<_> = list.iter().map(|r| r.region_detail.as_str()).collect();
  assert_eq!(details, ["Asia Pacific", "Europe"]);
}

#[tokio::test]
async fn taxonomy_lists_each_cluster_pairing() {
  let s = store().await;
  let list = report::value_taxonomy(&s).await.unwrap();
  assert_eq!(list.len(), 4);

  let clusters: Vec<_> = list
    .iter()
    .map(|t| t.cluster_list.as_deref().unwrap())
    .collect();
  assert_eq!(clusters, ["Economic", "Economic", "Environmental", "Environmental"]);

  let cost_reduction = list
    .iter()
    .filter(|t| t.value_generation_category.as_deref() == Some("Cost reduction"))
    .count();
  assert_eq!(cost_reduction, 2);
}

// ─── Value tools ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn value_tools_aggregate_every_fact() {
  let s = store().await;
  let tools = report::value_tools(&s).await.unwrap();
  assert_eq!(tools.len(), 45);

  let first = &tools[0];
  assert_eq!(first.data_point, "Data point 1");
  assert_eq!(first.categories.as_deref(), Some("Cost reduction, Revenue"));
  assert_eq!(first.logos.as_deref(), Some("logo-a.png, logo-b.png"));
  assert_eq!(first.segments.as_deref(), Some("Public sector"));
  assert_eq!(first.regions.as_deref(), Some("EU"));
  assert_eq!(first.download_link, None);

  let last = &tools[44];
  assert_eq!(last.regions, None);
  assert_eq!(last.logos, None);
}

// ─── Value generated ─────────────────────────────────────────────────────────

#[tokio::test]
async fn pages_through_forty_five_rows() {
  let s = store().await;
  let none = ValueFilters::default();

  let first = report::value_generated(&s, &none, page(0, 30)).await.unwrap();
  assert_eq!(first.data.len(), 30);
  assert!(first.page_info.is_first_page);
  assert!(!first.page_info.is_last_page);
  assert_eq!(first.page_info.page, 1);
  assert_eq!(first.page_info.total_rows, 45);

  let second = report::value_generated(&s, &none, page(1, 30)).await.unwrap();
  assert_eq!(second.data.len(), 15);
  assert!(!second.page_info.is_first_page);
  assert!(second.page_info.is_last_page);
  assert_eq!(second.page_info.page, 2);
  assert_eq!(second.page_info.page_size, 30);
  assert_eq!(second.page_info.total_rows, 45);

  assert_eq!(second.data[0].data_point, "Data point 31");
  assert_eq!(second.data[14].data_point, "Data point 45");
}

#[tokio::test]
async fn page_past_the_end_is_empty_and_last() {
  let s = store().await;
  let p = report::value_generated(&s, &ValueFilters::default(), page(5, 30))
    .await
    .unwrap();
  assert!(p.data.is_empty());
  assert!(p.page_info.is_last_page);
  assert_eq!(p.page_info.total_rows, 45);
}

#[tokio::test]
async fn fan_out_collapses_to_one_row_per_fact() {
  let s = store().await;
  let p = report::value_generated(&s, &ValueFilters::default(), page(0, 30))
    .await
    .unwrap();

  let fact1 = &p.data[0];
  assert_eq!(fact1.data_point, "Data point 1");
  assert_eq!(fact1.value_generation_category.as_deref(), Some("Cost reduction, Revenue"));
  assert_eq!(fact1.entity_logo.as_deref(), Some("logo-a.png, logo-b.png"));
  assert_eq!(fact1.segment.as_deref(), Some("Public sector"));
  // Two European countries, one region label.
  assert_eq!(fact1.region.as_deref(), Some("Europe"));

  let fact2 = &p.data[1];
  assert_eq!(fact2.segment.as_deref(), Some("Private sector, Public sector"));
}

#[tokio::test]
async fn fact_without_entities_appears_once() {
  let s = store().await;
  let p = report::value_generated(&s, &ValueFilters::default(), page(0, 30))
    .await
    .unwrap();

  let matches: Vec<_> = p
    .data
    .iter()
    .filter(|r| r.data_point == "Data point 11")
    .collect();
  assert_eq!(matches.len(), 1);
  assert_eq!(matches[0].entity_logo, None);
}

#[tokio::test]
async fn single_category_filter() {
  let s = store().await;
  let p = report::value_generated(&s, &filters(&["Revenue"], &[], &[]), page(0, 30))
    .await
    .unwrap();
  assert_eq!(p.page_info.total_rows, 16);
  assert_eq!(p.data.len(), 16);
  assert!(p.page_info.is_last_page);
  assert!(p.data.iter().all(|r| {
    r.value_generation_category
      .as_deref()
      .is_some_and(|c| c.contains("Revenue"))
  }));
}

#[tokio::test]
async fn categories_within_a_dimension_are_ored() {
  let s = store().await;
  let f = filters(&["Revenue", "Cost reduction"], &[], &[]);
  let p = report::value_generated(&s, &f, page(0, 30)).await.unwrap();
  assert_eq!(p.page_info.total_rows, 30);

  // Comma-joined spelling means the same thing.
  let joined = filters(&["Revenue,Cost reduction"], &[], &[]);
  let q = report::value_generated(&s, &joined, page(0, 30)).await.unwrap();
  assert_eq!(q.page_info.total_rows, 30);
}

#[tokio::test]
async fn dimensions_are_anded() {
  let s = store().await;
  let f = filters(&["Revenue"], &["Europe"], &[]);
  let p = report::value_generated(&s, &f, page(0, 30)).await.unwrap();
  assert_eq!(p.page_info.total_rows, 7);
  assert!(p.data.iter().all(|r| {
    r.region.as_deref() == Some("Europe")
      && r.value_generation_category.as_deref() == Some("Revenue")
  }));
}

#[tokio::test]
async fn total_rows_is_stable_across_pages() {
  let s = store().await;
  let f = filters(&[], &[], &["Public sector"]);

  let first = report::value_generated(&s, &f, page(0, 10)).await.unwrap();
  let second = report::value_generated(&s, &f, page(1, 10)).await.unwrap();
  let third = report::value_generated(&s, &f, page(2, 10)).await.unwrap();

  assert_eq!(first.page_info.total_rows, 24);
  assert_eq!(second.page_info.total_rows, 24);
  assert_eq!(third.page_info.total_rows, 24);
  assert_eq!(third.data.len(), 4);
  assert!(third.page_info.is_last_page);
  assert_ne!(first.data[0], second.data[0]);
}

#[tokio::test]
async fn value_generated_can_filter_on_excluded_region() {
  let s = store().await;
  let f = filters(&[], &["Russia & Belarus"], &[]);
  let p = report::value_generated(&s, &f, page(0, 30)).await.unwrap();
  assert_eq!(p.page_info.total_rows, 4);
  assert!(p.data.iter().all(|r| r.region.as_deref() == Some("Russia & Belarus")));
}

#[tokio::test]
async fn unknown_filter_value_matches_nothing() {
  let s = store().await;
  let f = filters(&["No such category"], &[], &[]);
  let p = report::value_generated(&s, &f, page(0, 30)).await.unwrap();
  assert_eq!(p.page_info.total_rows, 0);
  assert!(p.data.is_empty());
  assert!(p.page_info.is_first_page && p.page_info.is_last_page);
}

// ─── Snapshots on disk ───────────────────────────────────────────────────────

/// Write the schema and fixture to a fresh file under the temp dir.
fn write_snapshot(name: &str) -> std::path::PathBuf {
  let path = std::env::temp_dir()
    .join(format!("valgen-{}-{name}.sqlite3", std::process::id()));
  let _ = std::fs::remove_file(&path);
  let conn = rusqlite::Connection::open(&path).unwrap();
  conn.execute_batch(crate::SCHEMA).unwrap();
  conn
    .execute_batch(include_str!("../fixtures/sample.sql"))
    .unwrap();
  path
}

#[tokio::test]
async fn open_reads_an_existing_snapshot() {
  let path = write_snapshot("existing");
  let s = SqliteStore::open(&path).await.unwrap();

  let p = report::value_generated(&s, &ValueFilters::default(), page(0, 30))
    .await
    .unwrap();
  assert_eq!(p.page_info.total_rows, 45);

  let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn open_refuses_a_missing_file() {
  let path = std::env::temp_dir()
    .join(format!("valgen-{}-missing.sqlite3", std::process::id()));
  let _ = std::fs::remove_file(&path);

  assert!(SqliteStore::open(&path).await.is_err());
  assert!(!path.exists());
}

#[tokio::test]
async fn snapshots_are_opened_read_only() {
  let path = write_snapshot("read-only");
  let s = SqliteStore::open(&path).await.unwrap();

  let write = s.execute_batch(r#"DELETE FROM "Stakeholders";"#).await;
  assert!(write.is_err());
  assert_eq!(report::stakeholders(&s).await.unwrap().len(), 2);

  let _ = std::fs::remove_file(&path);
}

// ─── Row decoding ────────────────────────────────────────────────────────────

fn raw(sql: &str) -> SqlQuery {
  SqlQuery { sql: sql.to_owned(), params: Vec::new() }
}

#[tokio::test]
async fn rows_render_numbers_as_text() {
  let s = store().await;
  let mut session = s.session().await.unwrap();
  let mut rows = session
    .fetch_rows(&raw("SELECT 7 AS n, 1.5 AS r, NULL AS z, 'x' AS t"))
    .await
    .unwrap();

  let mut row = rows.remove(0);
  assert_eq!(row.take("n").unwrap().as_deref(), Some("7"));
  assert_eq!(row.take("r").unwrap().as_deref(), Some("1.5"));
  assert_eq!(row.take("z").unwrap(), None);
  assert_eq!(row.take("t").unwrap().as_deref(), Some("x"));
}

#[tokio::test]
async fn blob_columns_fail_to_decode() {
  let s = store().await;
  let mut session = s.session().await.unwrap();
  let result = session.fetch_rows(&raw("SELECT x'00ff' AS b")).await;
  assert!(result.is_err());
}
