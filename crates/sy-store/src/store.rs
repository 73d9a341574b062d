//! Query execution and canonical table persistence.
//!
//! Cells are read as `duckdb::types::Value` and mapped onto the small
//! [`Value`] model: every integer width becomes `Integer`, floats become
//! `Real`, and types with no counterpart (dates, decimals, lists) are carried
//! as their text rendering.

use duckdb::params;
use duckdb::types::Value as DuckValue;
use sy_core::schema::{current, party_record, position_record, resign_record};
use sy_core::{Table, Value};
use sy_pipeline::{CanonicalTables, SourceTables};

use crate::schemas::{self, quote_ident};
use crate::{Store, StoreError};

impl Store {
    /// Run a query and collect the full result as a named [`Table`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the SQL cannot be prepared or executed.
    pub fn query(&self, name: &str, sql: &str) -> Result<Table, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let columns = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut table = Table::new(name, &columns);
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                cells.push(convert(row.get::<_, DuckValue>(i)?));
            }
            table.push_row(cells);
        }
        tracing::debug!(table = name, rows = table.len(), "query complete");
        Ok(table)
    }

    /// Every row of one stored table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the table does not exist.
    pub fn select_all(&self, table: &str) -> Result<Table, StoreError> {
        self.query(table, &format!("SELECT * FROM {}", quote_ident(table)))
    }

    /// Load the four input record tables.
    ///
    /// Tables are read whole so that missing columns are reported by the
    /// pipeline rather than by SQL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if any table cannot be read.
    pub fn load_sources(&self) -> Result<SourceTables, StoreError> {
        Ok(SourceTables {
            current: self.select_all(current::TABLE)?,
            party: self.select_all(party_record::TABLE)?,
            position: self.select_all(position_record::TABLE)?,
            resignation: self.select_all(resign_record::TABLE)?,
        })
    }

    /// Replace `nodes`, `network` and `edges` with a pipeline result.
    ///
    /// Runs inside one transaction: either all three tables are replaced or
    /// the previous contents remain.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if any statement fails; the transaction
    /// is rolled back.
    pub fn write_canonical(&mut self, tables: &CanonicalTables) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(schemas::DROP_OUTPUT)?;
        tx.execute_batch(schemas::CREATE_NODES)?;
        tx.execute_batch(schemas::CREATE_NETWORK)?;
        tx.execute_batch(schemas::CREATE_EDGES)?;

        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO nodes (node, p_name, "current", reg_movement) VALUES (?, ?, ?, ?)"#,
            )?;
            for node in &tables.nodes {
                stmt.execute(params![
                    node.node_id,
                    node.label,
                    node.is_current,
                    node.is_regional_movement,
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO network (id_hdv, source, target, "year", edge) VALUES (?, ?, ?, ?, ?)"#,
            )?;
            for edge in &tables.network {
                stmt.execute(params![
                    edge.candidate_id,
                    edge.source,
                    edge.target,
                    edge.year,
                    edge.is_move,
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO edges (id_hdv, edge_rec, org_pol, p_name, node, "type", "begin", "end")
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
            )?;
            for event in &tables.events {
                stmt.execute(params![
                    event.candidate_id,
                    event.record,
                    event.raw_label,
                    event.label,
                    event.node,
                    event.event_type.as_str(),
                    event.begin_year,
                    event.end_year,
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!(
            nodes = tables.nodes.len(),
            network = tables.network.len(),
            edges = tables.events.len(),
            "canonical tables written"
        );
        Ok(())
    }
}

fn convert(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Boolean(b),
        DuckValue::TinyInt(v) => Value::Integer(i64::from(v)),
        DuckValue::SmallInt(v) => Value::Integer(i64::from(v)),
        DuckValue::Int(v) => Value::Integer(i64::from(v)),
        DuckValue::BigInt(v) => Value::Integer(v),
        DuckValue::UTinyInt(v) => Value::Integer(i64::from(v)),
        DuckValue::USmallInt(v) => Value::Integer(i64::from(v)),
        DuckValue::UInt(v) => Value::Integer(i64::from(v)),
        DuckValue::HugeInt(v) => {
            i64::try_from(v).map_or_else(|_| Value::Text(v.to_string()), Value::Integer)
        }
        DuckValue::UBigInt(v) => {
            i64::try_from(v).map_or_else(|_| Value::Text(v.to_string()), Value::Integer)
        }
        DuckValue::Float(v) => Value::Real(f64::from(v)),
        DuckValue::Double(v) => Value::Real(v),
        DuckValue::Text(s) | DuckValue::Enum(s) => Value::Text(s),
        DuckValue::Decimal(d) => Value::Text(d.to_string()),
        other => Value::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DuckValue::Int(2010), Value::Integer(2010))]
    #[case(DuckValue::HugeInt(7), Value::Integer(7))]
    #[case(DuckValue::UBigInt(u64::MAX), Value::Text(u64::MAX.to_string()))]
    #[case(DuckValue::Float(0.5), Value::Real(0.5))]
    #[case(DuckValue::Enum("a".into()), Value::Text("a".into()))]
    #[case(DuckValue::Null, Value::Null)]
    fn duckdb_values_map_onto_cells(#[case] input: DuckValue, #[case] expected: Value) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn query_collects_columns_and_rows() {
        let store = Store::open_in_memory().unwrap();
        let table = store
            .query("q", "SELECT 1 AS node, 'A' AS p_name")
            .unwrap();
        assert_eq!(table.columns, ["node", "p_name"]);
        assert_eq!(table.rows, vec![vec![Value::Integer(1), Value::from("A")]]);
    }

    #[test]
    fn invalid_sql_is_a_duckdb_error() {
        let store = Store::open_in_memory().unwrap();
        let err = store.query("q", "SELECT * FROM no_such_table").unwrap_err();
        assert!(matches!(err, StoreError::DuckDb(_)));
    }
}
