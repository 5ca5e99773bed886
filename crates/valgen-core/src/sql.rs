//! Dialect-aware SQL text assembly with bound parameters.
//!
//! Only the handful of constructs the report queries need differ between the
//! supported backends:
//!
//! | Construct | Postgres | SQLite |
//! |-----------|----------|--------|
//! | Placeholder | `$1` | `?1` |
//! | Table reference | `"schemacoredataset"."T"` | `"T"` |
//! | List membership | `x = ANY($1)` (text array) | `x IN rarray(?1)` |
//! | Distinct string aggregate | `STRING_AGG(DISTINCT x, ', ')` | `string_agg_distinct(x, ', ')` |
//!
//! The SQLite backend must register [`SQLITE_STRING_AGG_DISTINCT`] and load the
//! `rarray` module on every connection.

use crate::schema::{Column, SCHEMA, Table};

/// Name of the aggregate the SQLite backend registers in place of Postgres'
/// `STRING_AGG(DISTINCT …)`.
pub const SQLITE_STRING_AGG_DISTINCT: &str = "string_agg_distinct";

// ─── Dialect ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
  #[default]
  Postgres,
  Sqlite,
}

impl Dialect {
  pub fn name(self) -> &'static str {
    match self {
      Self::Postgres => "postgres",
      Self::Sqlite => "sqlite",
    }
  }

  pub fn quote_identifier(self, ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
  }

  pub fn quote_string(self, s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
  }

  /// `FROM`/`JOIN` target: the (schema-qualified) table and its alias.
  pub fn table(self, table: Table) -> String {
    let name = self.quote_identifier(table.name);
    match self {
      Self::Postgres => {
        format!("{}.{name} {}", self.quote_identifier(SCHEMA), table.alias)
      }
      Self::Sqlite => format!("{name} {}", table.alias),
    }
  }

  /// An alias-qualified column reference.
  pub fn column(self, column: Column) -> String {
    format!("{}.{}", column.table.alias, self.quote_identifier(column.name))
  }

  /// Placeholder for the `n`th (one-based) bound parameter.
  pub fn placeholder(self, n: usize) -> String {
    match self {
      Self::Postgres => format!("${n}"),
      Self::Sqlite => format!("?{n}"),
    }
  }

  /// `expr` is one of the values bound to a [`Param::TextList`] at
  /// `placeholder`.
  pub fn member_of(self, expr: &str, placeholder: &str) -> String {
    match self {
      Self::Postgres => format!("{expr} = ANY({placeholder})"),
      Self::Sqlite => format!("{expr} IN rarray({placeholder})"),
    }
  }

  /// Sorted, de-duplicated, separator-joined aggregate of the non-null values
  /// of `expr`; NULL when there are none.
  pub fn string_agg_distinct(self, expr: &str, separator: &str) -> String {
    let separator = self.quote_string(separator);
    match self {
      Self::Postgres => format!("STRING_AGG(DISTINCT {expr}, {separator})"),
      Self::Sqlite => {
        format!("{SQLITE_STRING_AGG_DISTINCT}({expr}, {separator})")
      }
    }
  }
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
  Text(String),
  /// A whole list bound to one placeholder; see [`Dialect::member_of`].
  TextList(Vec<String>),
  Int(i64),
}

impl From<&str> for Param {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Param {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Vec<String>> for Param {
  fn from(v: Vec<String>) -> Self { Self::TextList(v) }
}

impl From<i64> for Param {
  fn from(i: i64) -> Self { Self::Int(i) }
}

impl From<u64> for Param {
  fn from(u: u64) -> Self { Self::Int(i64::try_from(u).unwrap_or(i64::MAX)) }
}

/// Rendered SQL plus its parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
  pub sql:    String,
  pub params: Vec<Param>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Accumulates SQL text and numbers placeholders as parameters are bound.
#[derive(Debug)]
#[must_use = "builders have no effect until finished"]
pub struct SqlBuilder {
  dialect: Dialect,
  sql:     String,
  params:  Vec<Param>,
}

impl SqlBuilder {
  pub fn new(dialect: Dialect) -> Self {
    Self { dialect, sql: String::new(), params: Vec::new() }
  }

  pub fn dialect(&self) -> Dialect { self.dialect }

  pub fn push(&mut self, sql: &str) -> &mut Self {
    self.sql.push_str(sql);
    self
  }

  /// Register a parameter and return its placeholder without emitting it.
  pub fn bind(&mut self, param: impl Into<Param>) -> String {
    self.params.push(param.into());
    self.dialect.placeholder(self.params.len())
  }

  /// Register a parameter and emit its placeholder.
  pub fn push_bind(&mut self, param: impl Into<Param>) -> &mut Self {
    let placeholder = self.bind(param);
    self.push(&placeholder)
  }

  pub fn finish(self) -> SqlQuery {
    SqlQuery { sql: self.sql, params: self.params }
  }
}
