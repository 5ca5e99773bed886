//! SQL functions the report queries expect on every connection.

use std::collections::BTreeSet;

use rusqlite::{
  Connection,
  functions::{Aggregate, Context, FunctionFlags},
};
use valgen_core::sql::SQLITE_STRING_AGG_DISTINCT;

/// Register `string_agg_distinct` and load the `rarray` table-valued
/// function.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
  rusqlite::vtab::array::load_module(conn)?;
  conn.create_aggregate_function(
    SQLITE_STRING_AGG_DISTINCT,
    2,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    StringAggDistinct,
  )
}

#[derive(Default)]
struct Accumulator {
  values:    BTreeSet<String>,
  separator: Option<String>,
}

/// `string_agg_distinct(value, separator)`: the distinct non-null values in
/// sorted order, joined by `separator`; NULL when there are none. Same output
/// as Postgres' `STRING_AGG(DISTINCT value, separator)`.
struct StringAggDistinct;

impl Aggregate<Accumulator, Option<String>> for StringAggDistinct {
  fn init(&self, _: &mut Context<'_>) -> rusqlite::Result<Accumulator> {
    Ok(Accumulator::default())
  }

  fn step(
    &self,
    ctx: &mut Context<'_>,
    acc: &mut Accumulator,
  ) -> rusqlite::Result<()> {
    if acc.separator.is_none() {
      acc.separator = ctx.get::<Option<String>>(1)?;
    }
    if let Some(value) = ctx.get::<Option<String>>(0)? {
      acc.values.insert(value);
    }
    Ok(())
  }

  fn finalize(
    &self,
    _: &mut Context<'_>,
    acc: Option<Accumulator>,
  ) -> rusqlite::Result<Option<String>> {
    Ok(acc.filter(|a| !a.values.is_empty()).map(|a| {
      let separator = a.separator.unwrap_or_default();
      a.values.into_iter().collect::<Vec<_>>().join(&separator)
    }))
  }
}
