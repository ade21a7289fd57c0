//! The aggregation query registry: one fixed rollup per dataset, all sharing
//! the same transaction-validity filter.
//!
//! The SQL sticks to the portable subset BigQuery and DuckDB agree on, so the
//! exact text the pipeline submits to the warehouse is also what the tests
//! execute against a local engine.

use crate::config::SourceTables;
use crate::dataset::Dataset;

/// Measures shared by all three rollups.
///
/// A line item counts +1 toward `items` unless it is a void (`V`) or return
/// (`R`), which count -1. A transaction is one distinct
/// (date, register, employee, transaction-number) tuple. Sales are rounded
/// to cents.
const SHARED_MEASURES: &str = "\
  ROUND(SUM(total), 2) AS sales,
  COUNT(DISTINCT CONCAT(
    CAST(CAST(datetime AS DATE) AS STRING),
    CAST(register_no AS STRING),
    CAST(emp_no AS STRING),
    CAST(trans_no AS STRING))) AS transactions,
  SUM(CASE WHEN trans_status = 'V' OR trans_status = 'R' THEN -1 ELSE 1 END) AS items";

/// Validity filter applied to every rollup: drop the two non-merchandise
/// departments and keep only line items whose status is blank, void, or
/// return.
const SHARED_FILTER: &str = "\
  tr.department != 0
  AND tr.department != 15
  AND trans_status != 'M'
  AND trans_status != 'C'
  AND trans_status != 'J'
  AND (trans_status IS NULL
    OR trans_status = ' '
    OR trans_status = 'V'
    OR trans_status = 'R')";

/// Render the rollup query for `dataset` against the given source tables.
pub fn rollup_sql(dataset: Dataset, sources: &SourceTables) -> String {
    match dataset {
        Dataset::DateHour => format!(
            "SELECT
  CAST(CAST(datetime AS DATE) AS STRING) AS date,
  EXTRACT(HOUR FROM datetime) AS hour,
{measures}
FROM {transactions} AS tr
WHERE
{filter}
GROUP BY date, hour
ORDER BY date, hour",
            measures = SHARED_MEASURES,
            transactions = sources.transactions,
            filter = SHARED_FILTER,
        ),
        Dataset::OwnerYearMonth => format!(
            "SELECT
  card_no,
  EXTRACT(YEAR FROM datetime) AS year,
  EXTRACT(MONTH FROM datetime) AS month,
{measures}
FROM {transactions} AS tr
WHERE
{filter}
GROUP BY card_no, year, month
ORDER BY card_no, year, month",
            measures = SHARED_MEASURES,
            transactions = sources.transactions,
            filter = SHARED_FILTER,
        ),
        Dataset::ProductYearMonth => format!(
            "SELECT
  upc,
  LOWER(description) AS description,
  tr.department AS dept_num,
  lu.dept_name,
  EXTRACT(YEAR FROM datetime) AS year,
  EXTRACT(MONTH FROM datetime) AS month,
{measures}
FROM {transactions} AS tr
LEFT OUTER JOIN {lookup} AS lu
  ON lu.department = tr.department
WHERE
{filter}
GROUP BY upc, description, dept_num, dept_name, year, month
ORDER BY description, year, month",
            measures = SHARED_MEASURES,
            transactions = sources.transactions,
            lookup = sources.department_lookup,
            filter = SHARED_FILTER,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> SourceTables {
        SourceTables {
            transactions: "`co-op.transactions.transArchive_*`".to_string(),
            department_lookup: "`co-op.transactions.department_lookup`".to_string(),
        }
    }

    #[test]
    fn every_rollup_carries_the_shared_filter() {
        for ds in Dataset::ALL {
            let sql = rollup_sql(ds, &sources());
            assert!(sql.contains("tr.department != 0"), "{ds}: dept 0 filter");
            assert!(sql.contains("tr.department != 15"), "{ds}: dept 15 filter");
            for status in ["'M'", "'C'", "'J'"] {
                assert!(
                    sql.contains(&format!("trans_status != {status}")),
                    "{ds}: excludes {status}"
                );
            }
            assert!(sql.contains("ROUND(SUM(total), 2) AS sales"), "{ds}: sales");
            assert!(sql.contains("AS transactions"), "{ds}: transactions");
            assert!(sql.contains("THEN -1 ELSE 1 END) AS items"), "{ds}: items");
        }
    }

    #[test]
    fn grouping_and_ordering_per_dataset() {
        let sql = rollup_sql(Dataset::DateHour, &sources());
        assert!(sql.contains("GROUP BY date, hour"));
        assert!(sql.ends_with("ORDER BY date, hour"));

        let sql = rollup_sql(Dataset::OwnerYearMonth, &sources());
        assert!(sql.contains("GROUP BY card_no, year, month"));
        assert!(sql.ends_with("ORDER BY card_no, year, month"));

        let sql = rollup_sql(Dataset::ProductYearMonth, &sources());
        assert!(sql.contains("LEFT OUTER JOIN `co-op.transactions.department_lookup` AS lu"));
        assert!(sql.contains("GROUP BY upc, description, dept_num, dept_name, year, month"));
        assert!(sql.ends_with("ORDER BY description, year, month"));
    }

    #[test]
    fn select_list_matches_local_column_order() {
        // The SELECT aliases must appear in the same order as the local
        // columns the loader inserts into.
        for ds in Dataset::ALL {
            let sql = rollup_sql(ds, &sources());
            let mut last = 0;
            for col in ds.columns() {
                // Bare column selections (upc, card_no, lu.dept_name) carry
                // no AS alias; fall back to the first bare occurrence.
                let alias_at = sql
                    .find(&format!("AS {}", col.name))
                    .or_else(|| sql.find(col.name))
                    .unwrap_or_else(|| panic!("{ds}: `{}` missing from select list", col.name));
                assert!(alias_at >= last, "{ds}: `{}` out of order", col.name);
                last = alias_at;
            }
        }
    }
}
