//! The report queries.
//!
//! `/value-generated` is answered in two phases that must agree on which fact
//! rows match: a distinct count over the filtered fact join, then one
//! aggregated page of the same join. Both phases render their `FROM … WHERE`
//! part through [`push_fact_source`], so the join topology and the filter
//! predicates exist exactly once.

use crate::{
  filter::ValueFilters,
  page::PageRequest,
  schema::{
    AGGREGATE_SEPARATOR, CLUSTER_ID, COUNTRY, COUNTRY_ID, COUNTRY_REGION_ID,
    Column, ENTITIES, ENTITY_ID, ENTITY_LOGO, EXCLUDED_REGION_DETAIL,
    FACT_DISPLAY_COLUMNS, FACT_ID, REGION, REGION_CODE, REGION_DETAIL,
    REGION_ID, SEGMENT, SEGMENT_ID, STAKEHOLDERS, TAXONOMY_CLUSTERS,
    TAXONOMY_ID, Table, VALUE_CLUSTER, VALUE_CLUSTERS, VALUE_COUNTRIES,
    VALUE_ENTITIES, VALUE_GENERATED_TOOL, VALUE_GENERATION_CATEGORY,
    VALUE_STAKEHOLDERS, VALUE_TAXONOMY, VALUE_TAXONOMY_LINK,
  },
  sql::{Dialect, SqlBuilder, SqlQuery},
};

/// Output column labels shared by the queries and the record decoders.
pub mod label {
  pub const TOTAL_ROWS: &str = "total_rows";

  pub const ID_SEGMENT: &str = "IdSegment";
  pub const SEGMENT: &str = "Segment";
  pub const ID_REGION: &str = "IdRegion";
  pub const REGION_DETAIL: &str = "RegionDetail";
  pub const VALUE_GENERATION_CATEGORY: &str = "ValueGenerationCategory";
  pub const CLUSTER_LIST: &str = "ClusterList";

  pub const DATA_POINT: &str = "DataPoint";
  pub const DATA_POINT_NARRATIVE: &str = "DataPointNarrative";
  pub const DOWNLOAD_LINK: &str = "DownloadLink";
  pub const SOURCE_LINK: &str = "SourceLink";

  // `/value-generated` aggregates.
  pub const ENTITY_LOGO: &str = "EntityLogo";
  pub const REGION: &str = "Region";

  // `/value-tools` aggregates.
  pub const CATEGORIES: &str = "Categories";
  pub const LOGOS: &str = "Logos";
  pub const SEGMENTS: &str = "Segments";
  pub const REGIONS: &str = "Regions";
}

// ─── Fact join graph ─────────────────────────────────────────────────────────

/// One outer-join hop: `LEFT JOIN table ON left = right`.
struct Hop {
  table: Table,
  left:  Column,
  right: Column,
}

/// Every path from a fact row out to its dimensions. Each hop is a LEFT JOIN
/// so that a fact with no match on one dimension still yields a row.
const FACT_JOINS: [Hop; 9] = [
  Hop {
    table: VALUE_ENTITIES.table,
    left:  VALUE_ENTITIES.table2(),
    right: FACT_ID,
  },
  Hop { table: ENTITIES, left: ENTITY_ID, right: VALUE_ENTITIES.table1() },
  Hop {
    table: VALUE_STAKEHOLDERS.table,
    left:  VALUE_STAKEHOLDERS.table2(),
    right: FACT_ID,
  },
  Hop {
    table: STAKEHOLDERS,
    left:  SEGMENT_ID,
    right: VALUE_STAKEHOLDERS.table1(),
  },
  Hop {
    table: VALUE_TAXONOMY_LINK.table,
    left:  VALUE_TAXONOMY_LINK.table2(),
    right: FACT_ID,
  },
  Hop {
    table: VALUE_TAXONOMY,
    left:  TAXONOMY_ID,
    right: VALUE_TAXONOMY_LINK.table1(),
  },
  Hop {
    table: VALUE_COUNTRIES.table,
    left:  VALUE_COUNTRIES.table2(),
    right: FACT_ID,
  },
  Hop { table: COUNTRY, left: COUNTRY_ID, right: VALUE_COUNTRIES.table1() },
  Hop { table: REGION, left: REGION_ID, right: COUNTRY_REGION_ID },
];

/// Emit `FROM <fact> LEFT JOIN … [WHERE …]`. Empty filter lists add nothing;
/// the non-empty ones are ANDed, each as a single list-membership test.
fn push_fact_source(b: &mut SqlBuilder, filters: &ValueFilters) {
  let d = b.dialect();
  b.push("\nFROM ").push(&d.table(VALUE_GENERATED_TOOL));
  for hop in &FACT_JOINS {
    b.push("\nLEFT JOIN ")
      .push(&d.table(hop.table))
      .push(" ON ")
      .push(&d.column(hop.left))
      .push(" = ")
      .push(&d.column(hop.right));
  }

  let dimensions = [
    (VALUE_GENERATION_CATEGORY, &filters.values),
    (REGION_DETAIL, &filters.regions),
    (SEGMENT, &filters.stakeholders),
  ];

  let mut conds = Vec::new();
  for (column, wanted) in dimensions {
    if wanted.is_empty() {
      continue;
    }
    let placeholder = b.bind(wanted.clone());
    conds.push(d.member_of(&d.column(column), &placeholder));
  }

  if !conds.is_empty() {
    b.push("\nWHERE ").push(&conds.join("\n  AND "));
  }
}

fn push_select_as(b: &mut SqlBuilder, expr: &str, label: &str) {
  let quoted = b.dialect().quote_identifier(label);
  b.push(expr).push(" AS ").push(&quoted);
}

/// Emit the four fact display columns and the aggregated dimension columns,
/// comma-separated.
fn push_fact_select(b: &mut SqlBuilder, aggregates: [(Column, &str); 4]) {
  let d = b.dialect();
  let display = [
    label::DATA_POINT,
    label::DATA_POINT_NARRATIVE,
    label::DOWNLOAD_LINK,
    label::SOURCE_LINK,
  ];

  let mut first = true;
  for (column, name) in FACT_DISPLAY_COLUMNS.into_iter().zip(display) {
    if !first {
      b.push(",\n  ");
    }
    first = false;
    push_select_as(b, &d.column(column), name);
  }
  for (column, name) in aggregates {
    b.push(",\n  ");
    let agg = d.string_agg_distinct(&d.column(column), AGGREGATE_SEPARATOR);
    push_select_as(b, &agg, name);
  }
}

/// Fan-out rows collapse back to one row per fact: group on the fact id and
/// every non-aggregated column.
fn push_fact_group_order(b: &mut SqlBuilder) {
  let d = b.dialect();
  let group: Vec<String> = std::iter::once(FACT_ID)
    .chain(FACT_DISPLAY_COLUMNS)
    .map(|c| d.column(c))
    .collect();
  b.push("\nGROUP BY ")
    .push(&group.join(", "))
    .push("\nORDER BY ")
    .push(&d.column(FACT_ID));
}

// ─── /value-generated ────────────────────────────────────────────────────────

/// Number of distinct fact rows matching `filters`, independent of paging.
/// The join fans out, so identifiers are de-duplicated before counting.
pub fn count_value_generated(dialect: Dialect, filters: &ValueFilters) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT COUNT(*) AS ")
    .push(&dialect.quote_identifier(label::TOTAL_ROWS))
    .push(" FROM (\nSELECT DISTINCT ")
    .push(&dialect.column(FACT_ID));
  push_fact_source(&mut b, filters);
  b.push("\n) matching");
  b.finish()
}

/// One page of fact rows matching `filters`, each carrying the distinct
/// values of every dimension joined into a single string.
pub fn value_generated_page(
  dialect: Dialect,
  filters: &ValueFilters,
  page: PageRequest,
) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT\n  ");
  push_fact_select(&mut b, [
    (VALUE_GENERATION_CATEGORY, label::VALUE_GENERATION_CATEGORY),
    (ENTITY_LOGO, label::ENTITY_LOGO),
    (SEGMENT, label::SEGMENT),
    (REGION_DETAIL, label::REGION),
  ]);
  push_fact_source(&mut b, filters);
  push_fact_group_order(&mut b);
  b.push("\nLIMIT ")
    .push_bind(page.limit)
    .push(" OFFSET ")
    .push_bind(page.offset());
  b.finish()
}

// ─── /value-tools ────────────────────────────────────────────────────────────

/// Every fact row, unfiltered and unpaginated, with all four dimensions
/// aggregated. Regions are reported by their short code here.
pub fn value_tools(dialect: Dialect) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT\n  ");
  push_fact_select(&mut b, [
    (VALUE_GENERATION_CATEGORY, label::CATEGORIES),
    (ENTITY_LOGO, label::LOGOS),
    (SEGMENT, label::SEGMENTS),
    (REGION_CODE, label::REGIONS),
  ]);
  push_fact_source(&mut b, &ValueFilters::default());
  push_fact_group_order(&mut b);
  b.finish()
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// All stakeholder segments, alphabetically.
pub fn stakeholders(dialect: Dialect) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT ");
  push_select_as(&mut b, &dialect.column(SEGMENT_ID), label::ID_SEGMENT);
  b.push(", ");
  push_select_as(&mut b, &dialect.column(SEGMENT), label::SEGMENT);
  b.push("\nFROM ")
    .push(&dialect.table(STAKEHOLDERS))
    .push("\nORDER BY ")
    .push(&dialect.column(SEGMENT))
    .push(" ASC");
  b.finish()
}

/// All regions except [`EXCLUDED_REGION_DETAIL`], by display label.
pub fn regions(dialect: Dialect) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT ");
  push_select_as(&mut b, &dialect.column(REGION_ID), label::ID_REGION);
  b.push(", ");
  push_select_as(&mut b, &dialect.column(REGION_DETAIL), label::REGION_DETAIL);
  b.push("\nFROM ")
    .push(&dialect.table(REGION))
    .push("\nWHERE ")
    .push(&dialect.column(REGION_DETAIL))
    .push(" <> ")
    .push_bind(EXCLUDED_REGION_DETAIL)
    .push("\nORDER BY ")
    .push(&dialect.column(REGION_DETAIL))
    .push(" ASC");
  b.finish()
}

/// Each taxonomy category paired with each cluster it belongs to, ordered by
/// cluster. Not aggregated: a category in two clusters appears twice.
pub fn value_taxonomy(dialect: Dialect) -> SqlQuery {
  let mut b = SqlBuilder::new(dialect);
  b.push("SELECT ");
  push_select_as(
    &mut b,
    &dialect.column(VALUE_GENERATION_CATEGORY),
    label::VALUE_GENERATION_CATEGORY,
  );
  b.push(", ");
  push_select_as(&mut b, &dialect.column(VALUE_CLUSTER), label::CLUSTER_LIST);
  b.push("\nFROM ")
    .push(&dialect.table(VALUE_TAXONOMY))
    .push("\nJOIN ")
    .push(&dialect.table(TAXONOMY_CLUSTERS.table))
    .push(" ON ")
    .push(&dialect.column(TAXONOMY_ID))
    .push(" = ")
    .push(&dialect.column(TAXONOMY_CLUSTERS.table1()))
    .push("\nJOIN ")
    .push(&dialect.table(VALUE_CLUSTERS))
    .push(" ON ")
    .push(&dialect.column(TAXONOMY_CLUSTERS.table2()))
    .push(" = ")
    .push(&dialect.column(CLUSTER_ID))
    .push("\nORDER BY ")
    .push(&dialect.column(VALUE_CLUSTER))
    .push(" ASC");
  b.finish()
}
