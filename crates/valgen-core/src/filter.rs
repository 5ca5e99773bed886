//! Normalisation of multi-valued filter parameters.
//!
//! Browsers send list filters either as a repeated parameter
//! (`values=a&values=b`) or as one comma-joined value (`values=a,b`), and
//! sometimes both. Everything collapses into one ordered token list.

/// Split each raw input on commas and keep the trimmed, non-empty tokens in
/// input order. Duplicates are preserved.
pub fn normalize<I, S>(raw: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  raw
    .into_iter()
    .flat_map(|r| {
      r.as_ref()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>()
    })
    .collect()
}

/// The three optional dimension filters of `/value-generated`, already
/// normalised. An empty list means "no constraint on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueFilters {
  /// Matched against `ValueTaxonomy.ValueGenerationCategory`.
  pub values:       Vec<String>,
  /// Matched against `Region.RegionDetail`.
  pub regions:      Vec<String>,
  /// Matched against `Stakeholders.Segment`.
  pub stakeholders: Vec<String>,
}

impl ValueFilters {
  /// Build from the raw, un-normalised parameter values of each dimension.
  pub fn from_raw<V, R, S>(values: V, regions: R, stakeholders: S) -> Self
  where
    V: IntoIterator,
    V::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
    S: IntoIterator,
    S::Item: AsRef<str>,
  {
    Self {
      values:       normalize(values),
      regions:      normalize(regions),
      stakeholders: normalize(stakeholders),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
      && self.regions.is_empty()
      && self.stakeholders.is_empty()
  }
}
