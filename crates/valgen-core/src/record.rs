//! Result records, one type per endpoint, and the row decoding that produces
//! them.
//!
//! Backends deliver [`Row`]s: every selected column, by output label, as
//! optional text. Records take what they need by label; anything else is
//! ignored.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, query::label};

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One result row as delivered by a backend.
///
/// Values are text only, as every report column is a label or an aggregated
/// string. Backends render numeric columns as text; a column of any other
/// type fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
  columns: Vec<(String, Option<String>)>,
}

impl Row {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
    self.columns.push((name.into(), value));
  }

  /// Builder-style [`Row::push`].
  pub fn with(mut self, name: &str, value: Option<&str>) -> Self {
    self.push(name, value.map(str::to_owned));
    self
  }

  /// Remove and return a nullable column.
  pub fn take(&mut self, name: &str) -> Result<Option<String>> {
    let idx = self
      .columns
      .iter()
      .position(|(n, _)| n == name)
      .ok_or_else(|| Error::MissingColumn(name.to_owned()))?;
    Ok(self.columns.swap_remove(idx).1)
  }

  /// Remove and return a column that must not be null.
  pub fn take_required(&mut self, name: &str) -> Result<String> {
    self
      .take(name)?
      .ok_or_else(|| Error::NullColumn(name.to_owned()))
  }
}

/// Decoding of a [`Row`] into a record.
pub trait FromRow: Sized {
  fn from_row(row: Row) -> Result<Self>;
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// `GET /stakeholders` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stakeholder {
  pub id_segment: String,
  pub segment:    String,
}

impl FromRow for Stakeholder {
  fn from_row(mut row: Row) -> Result<Self> {
    Ok(Self {
      id_segment: row.take_required(label::ID_SEGMENT)?,
      segment:    row.take_required(label::SEGMENT)?,
    })
  }
}

/// `GET /regions` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionListing {
  pub id_region:     String,
  pub region_detail: String,
}

impl FromRow for RegionListing {
  fn from_row(mut row: Row) -> Result<Self> {
    Ok(Self {
      id_region:     row.take_required(label::ID_REGION)?,
      region_detail: row.take_required(label::REGION_DETAIL)?,
    })
  }
}

/// `GET /value-taxonomy` item: one category/cluster pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxonomyEntry {
  pub value_generation_category: Option<String>,
  pub cluster_list:              Option<String>,
}

impl FromRow for TaxonomyEntry {
  fn from_row(mut row: Row) -> Result<Self> {
    Ok(Self {
      value_generation_category: row.take(label::VALUE_GENERATION_CATEGORY)?,
      cluster_list:              row.take(label::CLUSTER_LIST)?,
    })
  }
}

// ─── Fact rows ───────────────────────────────────────────────────────────────

/// `GET /value-generated` item. The last four fields hold the distinct
/// values of one dimension, joined with `", "`; `None` when the fact has no
/// row on that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueGeneratedRow {
  pub data_point:                String,
  pub data_point_narrative:      Option<String>,
  pub download_link:             Option<String>,
  pub source_link:               Option<String>,
  pub value_generation_category: Option<String>,
  pub entity_logo:               Option<String>,
  pub segment:                   Option<String>,
  /// Region display labels.
  pub region:                    Option<String>,
}

impl FromRow for ValueGeneratedRow {
  fn from_row(mut row: Row) -> Result<Self> {
    Ok(Self {
      data_point:                row.take_required(label::DATA_POINT)?,
      data_point_narrative:      row.take(label::DATA_POINT_NARRATIVE)?,
      download_link:             row.take(label::DOWNLOAD_LINK)?,
      source_link:               row.take(label::SOURCE_LINK)?,
      value_generation_category: row.take(label::VALUE_GENERATION_CATEGORY)?,
      entity_logo:               row.take(label::ENTITY_LOGO)?,
      segment:                   row.take(label::SEGMENT)?,
      region:                    row.take(label::REGION)?,
    })
  }
}

/// `GET /value-tools` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueTool {
  pub data_point:           String,
  pub data_point_narrative: Option<String>,
  pub download_link:        Option<String>,
  pub source_link:          Option<String>,
  pub categories:           Option<String>,
  pub logos:                Option<String>,
  pub segments:             Option<String>,
  /// Region codes.
  pub regions:              Option<String>,
}

impl FromRow for ValueTool {
  fn from_row(mut row: Row) -> Result<Self> {
    Ok(Self {
      data_point:           row.take_required(label::DATA_POINT)?,
      data_point_narrative: row.take(label::DATA_POINT_NARRATIVE)?,
      download_link:        row.take(label::DOWNLOAD_LINK)?,
      source_link:          row.take(label::SOURCE_LINK)?,
      categories:           row.take(label::CATEGORIES)?,
      logos:                row.take(label::LOGOS)?,
      segments:             row.take(label::SEGMENTS)?,
      regions:              row.take(label::REGIONS)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_by_label_in_any_order() {
    let row = Row::new()
      .with("Segment", Some("Public sector"))
      .with("IdSegment", Some("seg-1"));
    let s = Stakeholder::from_row(row).unwrap();
    assert_eq!(s.id_segment, "seg-1");
    assert_eq!(s.segment, "Public sector");
  }

  #[test]
  fn missing_and_null_columns_are_errors() {
    let row = Row::new().with("IdSegment", Some("seg-1"));
    assert!(matches!(
      Stakeholder::from_row(row),
      Err(Error::MissingColumn(c)) if c == "Segment"
    ));

    let row = Row::new()
      .with("IdSegment", Some("seg-1"))
      .with("Segment", None);
    assert!(matches!(
      Stakeholder::from_row(row),
      Err(Error::NullColumn(c)) if c == "Segment"
    ));
  }

  #[test]
  fn fact_row_keeps_null_aggregates() {
    let row = Row::new()
      .with("DataPoint", Some("Saved 10%"))
      .with("DataPointNarrative", None)
      .with("DownloadLink", None)
      .with("SourceLink", Some("https://example.org"))
      .with("ValueGenerationCategory", Some("Cost, Revenue"))
      .with("EntityLogo", None)
      .with("Segment", Some("Public sector"))
      .with("Region", Some("Europe"));
    let r = ValueGeneratedRow::from_row(row).unwrap();
    assert_eq!(r.entity_logo, None);
    assert_eq!(r.value_generation_category.as_deref(), Some("Cost, Revenue"));
  }

  #[test]
  fn serializes_with_dataset_column_names() {
    let r = RegionListing {
      id_region:     "r1".into(),
      region_detail: "Europe".into(),
    };
    assert_eq!(
      serde_json::to_value(&r).unwrap(),
      serde_json::json!({ "IdRegion": "r1", "RegionDetail": "Europe" })
    );

    let t = ValueTool {
      data_point:           "dp".into(),
      data_point_narrative: None,
      download_link:        None,
      source_link:          None,
      categories:           Some("A, B".into()),
      logos:                None,
      segments:             None,
      regions:              Some("EU".into()),
    };
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["DataPointNarrative"], serde_json::Value::Null);
    assert_eq!(json["Categories"], "A, B");
    assert_eq!(json["Regions"], "EU");
  }
}
