//! Tabular query results.
//!
//! A [`Table`] is a named, column-ordered set of rows of [`Value`] cells. It is
//! the common currency between the store (which produces tables from SQL), the
//! pipeline (which consumes input tables), and the graph validator (which
//! checks arbitrary query results).

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::errors::DataError;

/// A single cell value.
///
/// Implements `Eq` and `Hash` so cells can be used directly as node keys and
/// uniqueness keys. Reals compare by bit pattern.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer view of the cell. Integral reals and numeric text are accepted.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            #[allow(clippy::cast_possible_truncation)] // guarded by the fract/range check
            Self::Real(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => {
                Some(*v as i64)
            }
            Self::Text(s) => s.trim().parse().ok(),
            Self::Boolean(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Integer(0) => Some(false),
            Self::Integer(1) => Some(true),
            _ => None,
        }
    }

    /// Total order for sorting keys: nulls, booleans, numbers, then text.
    ///
    /// Integers and reals compare numerically with each other.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(_) | Self::Real(_), Self::Integer(_) | Self::Real(_)) => {
                self.as_f64().total_cmp(&other.as_f64())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    #[allow(clippy::cast_precision_loss)] // ordering only
    fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(v) => *v as f64,
            Self::Real(v) => *v,
            _ => 0.0,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) | Self::Real(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Boolean(b) => b.hash(state),
            Self::Integer(v) => v.hash(state),
            Self::Real(v) => v.to_bits().hash(state),
            Self::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A named query result: ordered column names plus rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    ///
    /// Qualified names (`alias.column`) are reduced to their last segment.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|c| unqualified(c.as_ref()).to_string())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with `NULL`, long rows truncated.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Required columns that are absent, in the order given.
    #[must_use]
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| (*c).to_string())
            .collect()
    }

    /// Resolve required columns to their indices.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SchemaMismatch`] listing every absent column.
    pub fn require_columns(&self, required: &[&str]) -> Result<Vec<usize>, DataError> {
        let missing = self.missing_columns(required);
        if !missing.is_empty() {
            return Err(DataError::SchemaMismatch {
                table: self.name.clone(),
                missing,
            });
        }
        Ok(required
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect())
    }

    /// Cell at `row`, `column`; `NULL` when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Value::Null)
    }

    /// Project a row onto the given column indices.
    #[must_use]
    pub fn key(&self, row: usize, columns: &[usize]) -> Vec<Value> {
        columns.iter().map(|&c| self.cell(row, c).clone()).collect()
    }

    /// Distinct values of one column.
    #[must_use]
    pub fn distinct(&self, column: usize) -> HashSet<Value> {
        (0..self.len()).map(|r| self.cell(r, column).clone()).collect()
    }
}

/// Format a key tuple for error messages: `a, b, c`.
#[must_use]
pub fn format_key(key: &[Value]) -> String {
    key.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn unqualified(column: &str) -> &str {
    column.rsplit('.').next().unwrap_or(column)
}
