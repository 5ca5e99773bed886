//! SQL schema mirroring the production dataset.
//!
//! Table and column names match the Postgres tables in `schemacoredataset`
//! exactly, so the same report queries run against both. The data-entry tool
//! owns the production schema; this copy exists for local snapshots and
//! tests.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS "ValueGeneratedTool" (
    "id"                 INTEGER PRIMARY KEY,
    "DataPoint"          TEXT NOT NULL,
    "DataPointNarrative" TEXT,
    "DownloadLink"       TEXT,
    "SourceLink"         TEXT
);

CREATE TABLE IF NOT EXISTS "Entities" (
    "IdEntity"   TEXT PRIMARY KEY,
    "EntityLogo" TEXT
);

CREATE TABLE IF NOT EXISTS "Stakeholders" (
    "IdSegment" TEXT PRIMARY KEY,
    "Segment"   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "ValueTaxonomy" (
    "IdValueTaxonomy"         TEXT PRIMARY KEY,
    "ValueGenerationCategory" TEXT
);

CREATE TABLE IF NOT EXISTS "ValueClusters" (
    "IdClusterCategory" TEXT PRIMARY KEY,
    "ValueCluster"      TEXT
);

CREATE TABLE IF NOT EXISTS "Region" (
    "IdRegion"     TEXT PRIMARY KEY,
    "Region"       TEXT,   -- short code
    "RegionDetail" TEXT    -- display label
);

CREATE TABLE IF NOT EXISTS "Country" (
    "IdCountry" TEXT PRIMARY KEY,
    "Region_id" TEXT REFERENCES "Region"("IdRegion")
);

-- Link tables: table1_id is the dimension side, table2_id the other side.

-- Entities <-> ValueGeneratedTool
CREATE TABLE IF NOT EXISTS "nc_18z6___nc_m2m_jvbe0yrzlx" (
    table1_id TEXT    NOT NULL REFERENCES "Entities"("IdEntity"),
    table2_id INTEGER NOT NULL REFERENCES "ValueGeneratedTool"("id"),
    PRIMARY KEY (table1_id, table2_id)
);

-- Stakeholders <-> ValueGeneratedTool
CREATE TABLE IF NOT EXISTS "nc_18z6___nc_m2m_92jecqh6hi" (
    table1_id TEXT    NOT NULL REFERENCES "Stakeholders"("IdSegment"),
    table2_id INTEGER NOT NULL REFERENCES "ValueGeneratedTool"("id"),
    PRIMARY KEY (table1_id, table2_id)
);

-- ValueTaxonomy <-> ValueGeneratedTool
CREATE TABLE IF NOT EXISTS "nc_18z6___nc_m2m_7g_er1fyle" (
    table1_id TEXT    NOT NULL REFERENCES "ValueTaxonomy"("IdValueTaxonomy"),
    table2_id INTEGER NOT NULL REFERENCES "ValueGeneratedTool"("id"),
    PRIMARY KEY (table1_id, table2_id)
);

-- Country <-> ValueGeneratedTool
CREATE TABLE IF NOT EXISTS "nc_18z6___nc_m2m_2ddjpb613i" (
    table1_id TEXT    NOT NULL REFERENCES "Country"("IdCountry"),
    table2_id INTEGER NOT NULL REFERENCES "ValueGeneratedTool"("id"),
    PRIMARY KEY (table1_id, table2_id)
);

-- ValueTaxonomy <-> ValueClusters
CREATE TABLE IF NOT EXISTS "nc_j64s___nc_m2m_vta36xadlc" (
    table1_id TEXT NOT NULL REFERENCES "ValueTaxonomy"("IdValueTaxonomy"),
    table2_id TEXT NOT NULL REFERENCES "ValueClusters"("IdClusterCategory"),
    PRIMARY KEY (table1_id, table2_id)
);
"#;
