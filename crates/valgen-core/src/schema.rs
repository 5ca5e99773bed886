//! Table and column names of the dataset.
//!
//! The dataset is maintained by an external data-entry tool, which also
//! generated the many-to-many link table names. Every name here must match
//! the live database exactly.

/// Postgres schema holding every base table.
pub const SCHEMA: &str = "schemacoredataset";

/// `RegionDetail` value hidden from the region listing.
pub const EXCLUDED_REGION_DETAIL: &str = "Russia & Belarus";

/// Separator used when a dimension is aggregated into one string.
pub const AGGREGATE_SEPARATOR: &str = ", ";

// ─── Building blocks ─────────────────────────────────────────────────────────

/// A base table, together with the alias it gets in generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
  pub name:  &'static str,
  pub alias: &'static str,
}

impl Table {
  pub const fn col(self, name: &'static str) -> Column {
    Column { table: self, name }
  }
}

/// A column of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub table: Table,
  pub name:  &'static str,
}

// ─── Fact ────────────────────────────────────────────────────────────────────

pub const VALUE_GENERATED_TOOL: Table =
  Table { name: "ValueGeneratedTool", alias: "vgt" };

pub const FACT_ID: Column = VALUE_GENERATED_TOOL.col("id");
pub const DATA_POINT: Column = VALUE_GENERATED_TOOL.col("DataPoint");
pub const DATA_POINT_NARRATIVE: Column =
  VALUE_GENERATED_TOOL.col("DataPointNarrative");
pub const DOWNLOAD_LINK: Column = VALUE_GENERATED_TOOL.col("DownloadLink");
pub const SOURCE_LINK: Column = VALUE_GENERATED_TOOL.col("SourceLink");

/// The display fields of a fact row, in output order.
pub const FACT_DISPLAY_COLUMNS: [Column; 4] =
  [DATA_POINT, DATA_POINT_NARRATIVE, DOWNLOAD_LINK, SOURCE_LINK];

// ─── Dimensions ──────────────────────────────────────────────────────────────

pub const ENTITIES: Table = Table { name: "Entities", alias: "ent" };
pub const ENTITY_ID: Column = ENTITIES.col("IdEntity");
pub const ENTITY_LOGO: Column = ENTITIES.col("EntityLogo");

pub const STAKEHOLDERS: Table = Table { name: "Stakeholders", alias: "sh" };
pub const SEGMENT_ID: Column = STAKEHOLDERS.col("IdSegment");
pub const SEGMENT: Column = STAKEHOLDERS.col("Segment");

pub const VALUE_TAXONOMY: Table = Table { name: "ValueTaxonomy", alias: "tax" };
pub const TAXONOMY_ID: Column = VALUE_TAXONOMY.col("IdValueTaxonomy");
pub const VALUE_GENERATION_CATEGORY: Column =
  VALUE_TAXONOMY.col("ValueGenerationCategory");

pub const VALUE_CLUSTERS: Table = Table { name: "ValueClusters", alias: "vcl" };
pub const CLUSTER_ID: Column = VALUE_CLUSTERS.col("IdClusterCategory");
pub const VALUE_CLUSTER: Column = VALUE_CLUSTERS.col("ValueCluster");

pub const COUNTRY: Table = Table { name: "Country", alias: "ctry" };
pub const COUNTRY_ID: Column = COUNTRY.col("IdCountry");
pub const COUNTRY_REGION_ID: Column = COUNTRY.col("Region_id");

pub const REGION: Table = Table { name: "Region", alias: "reg" };
pub const REGION_ID: Column = REGION.col("IdRegion");
/// Short region code.
pub const REGION_CODE: Column = REGION.col("Region");
/// Display label, the value clients filter on.
pub const REGION_DETAIL: Column = REGION.col("RegionDetail");

// ─── Link tables ─────────────────────────────────────────────────────────────

/// A pure many-to-many bridge. `table1_id` points at the dimension row,
/// `table2_id` at the other side (the fact row, or the cluster).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
  pub table: Table,
}

impl Link {
  pub const fn table1(self) -> Column { self.table.col("table1_id") }

  pub const fn table2(self) -> Column { self.table.col("table2_id") }
}

/// Entities ↔ ValueGeneratedTool.
pub const VALUE_ENTITIES: Link = Link {
  table: Table { name: "nc_18z6___nc_m2m_jvbe0yrzlx", alias: "l_ent" },
};

/// Stakeholders ↔ ValueGeneratedTool.
pub const VALUE_STAKEHOLDERS: Link = Link {
  table: Table { name: "nc_18z6___nc_m2m_92jecqh6hi", alias: "l_sh" },
};

/// ValueTaxonomy ↔ ValueGeneratedTool.
pub const VALUE_TAXONOMY_LINK: Link = Link {
  table: Table { name: "nc_18z6___nc_m2m_7g_er1fyle", alias: "l_tax" },
};

/// Country ↔ ValueGeneratedTool.
pub const VALUE_COUNTRIES: Link = Link {
  table: Table { name: "nc_18z6___nc_m2m_2ddjpb613i", alias: "l_ctry" },
};

/// ValueTaxonomy ↔ ValueClusters.
pub const TAXONOMY_CLUSTERS: Link = Link {
  table: Table { name: "nc_j64s___nc_m2m_vta36xadlc", alias: "l_vcl" },
};
