//! Local rollup store: drop-and-recreate provisioning plus positional row
//! loading into DuckDB.

use anyhow::{bail, Context, Result};
use duckdb::types::{ToSql, ToSqlOutput};
use duckdb::{params_from_iter, Connection};
use tracing::info;

use crate::dataset::{Dataset, Row, Value};
use crate::warehouse::WarehouseError;

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        use duckdb::types::Value as Sql;
        let v = match self {
            Value::Null => Sql::Null,
            Value::Bool(b) => Sql::Boolean(*b),
            Value::Int(i) => Sql::BigInt(*i),
            Value::Real(f) => Sql::Double(*f),
            Value::Text(s) => Sql::Text(s.clone()),
        };
        Ok(ToSqlOutput::Owned(v))
    }
}

/// `CREATE TABLE` statement for `dataset`, rendered from its fixed column
/// list.
fn create_table_sql(dataset: Dataset) -> String {
    let columns: Vec<String> = dataset
        .columns()
        .iter()
        .map(|c| format!("{} {}", c.name, c.ty.sql()))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        dataset.as_str(),
        columns.join(", ")
    )
}

/// Positional `INSERT` statement for `dataset`, rendered from the same
/// column list as the DDL so the two cannot drift apart.
fn insert_sql(dataset: Dataset) -> String {
    let cols = dataset.columns();
    let names: Vec<&str> = cols.iter().map(|c| c.name).collect();
    let placeholders = vec!["?"; cols.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        dataset.as_str(),
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Drop and recreate the local table for `dataset`. Idempotent: the drop
/// tolerates a missing table, the create always starts from empty.
pub fn provision_table(conn: &Connection, dataset: Dataset) -> Result<()> {
    conn.execute(
        &format!("DROP TABLE IF EXISTS {}", dataset.as_str()),
        [],
    )
    .with_context(|| format!("dropping local table {}", dataset))?;
    conn.execute(&create_table_sql(dataset), [])
        .with_context(|| format!("creating local table {}", dataset))?;
    Ok(())
}

/// Insert each aggregated row into `dataset`'s local table, positionally,
/// and return the number inserted. Consumes `rows` once; a failed row or a
/// stream error aborts the load.
pub fn load_rows<I>(conn: &Connection, dataset: Dataset, rows: I) -> Result<u64>
where
    I: IntoIterator<Item = Result<Row, WarehouseError>>,
{
    let expected = dataset.columns().len();
    let mut stmt = conn
        .prepare(&insert_sql(dataset))
        .with_context(|| format!("preparing insert for {}", dataset))?;

    let mut loaded = 0u64;
    for row in rows {
        let row = row.with_context(|| format!("reading result row for {}", dataset))?;
        if row.len() != expected {
            bail!(
                "row arity mismatch for {}: got {} values, table has {} columns",
                dataset,
                row.len(),
                expected
            );
        }
        stmt.execute(params_from_iter(row.iter()))
            .with_context(|| format!("inserting row into {}", dataset))?;
        loaded += 1;
    }

    info!(table = dataset.as_str(), rows = loaded, "loaded local table");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(conn: &Connection, dataset: Dataset) -> Result<i64> {
        let n = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", dataset.as_str()),
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }

    fn sample_row(dataset: Dataset) -> Row {
        match dataset {
            Dataset::DateHour => vec![
                Value::Text("2010-01-05".into()),
                Value::Int(9),
                Value::Real(153.40),
                Value::Int(12),
                Value::Int(31),
            ],
            Dataset::OwnerYearMonth => vec![
                Value::Int(18736),
                Value::Int(2010),
                Value::Int(1),
                Value::Real(412.05),
                Value::Int(6),
                Value::Int(44),
            ],
            Dataset::ProductYearMonth => vec![
                Value::Text("0003049466025".into()),
                Value::Text("clementines 2lb".into()),
                Value::Int(4),
                Value::Text("PRODUCE".into()),
                Value::Int(2010),
                Value::Int(1),
                Value::Real(88.20),
                Value::Int(17),
                Value::Int(18),
            ],
        }
    }

    #[test]
    fn provision_then_insert_round_trips_for_every_dataset() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        for ds in Dataset::ALL {
            provision_table(&conn, ds)?;
            let loaded = load_rows(&conn, ds, vec![Ok(sample_row(ds))])?;
            assert_eq!(loaded, 1);
            assert_eq!(count(&conn, ds)?, 1);
        }
        Ok(())
    }

    #[test]
    fn provisioning_is_idempotent_and_resets_the_table() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        provision_table(&conn, Dataset::DateHour)?;
        load_rows(&conn, Dataset::DateHour, vec![Ok(sample_row(Dataset::DateHour))])?;
        assert_eq!(count(&conn, Dataset::DateHour)?, 1);

        // Second provisioning drops the now-existing table without error.
        provision_table(&conn, Dataset::DateHour)?;
        assert_eq!(count(&conn, Dataset::DateHour)?, 0);
        Ok(())
    }

    #[test]
    fn loader_counts_rows_including_none() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        provision_table(&conn, Dataset::OwnerYearMonth)?;

        let empty: Vec<Result<Row, WarehouseError>> = Vec::new();
        assert_eq!(load_rows(&conn, Dataset::OwnerYearMonth, empty)?, 0);

        let rows: Vec<_> = (0..7)
            .map(|i| {
                let mut row = sample_row(Dataset::OwnerYearMonth);
                row[0] = Value::Int(10_000 + i);
                Ok(row)
            })
            .collect();
        assert_eq!(load_rows(&conn, Dataset::OwnerYearMonth, rows)?, 7);
        assert_eq!(count(&conn, Dataset::OwnerYearMonth)?, 7);
        Ok(())
    }

    #[test]
    fn arity_mismatch_fails_loudly() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        provision_table(&conn, Dataset::DateHour)?;

        let short = vec![Ok(vec![Value::Text("2010-01-05".into()), Value::Int(9)])];
        let err = load_rows(&conn, Dataset::DateHour, short).unwrap_err();
        assert!(err.to_string().contains("arity mismatch"));
        Ok(())
    }

    #[test]
    fn stream_errors_propagate() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        provision_table(&conn, Dataset::DateHour)?;

        let rows = vec![
            Ok(sample_row(Dataset::DateHour)),
            Err(WarehouseError::Backend(anyhow::anyhow!("quota exceeded"))),
        ];
        assert!(load_rows(&conn, Dataset::DateHour, rows).is_err());
        Ok(())
    }

    #[test]
    fn null_values_land_as_sql_nulls() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        provision_table(&conn, Dataset::ProductYearMonth)?;

        // Unmatched departments come back with a NULL dept_name.
        let mut row = sample_row(Dataset::ProductYearMonth);
        row[3] = Value::Null;
        load_rows(&conn, Dataset::ProductYearMonth, vec![Ok(row)])?;

        let nulls: i64 = conn.query_row(
            "SELECT COUNT(*) FROM product_year_month WHERE dept_name IS NULL",
            [],
            |r| r.get(0),
        )?;
        assert_eq!(nulls, 1);
        Ok(())
    }
}
