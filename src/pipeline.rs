//! Sequential orchestration: stage raw archives into the warehouse, then
//! rebuild the local rollup tables from the fixed aggregation queries.

use anyhow::{Context, Result};
use duckdb::Connection;
use tracing::info;

use crate::config::SourceTables;
use crate::dataset::Dataset;
use crate::local::{load_rows, provision_table};
use crate::query::rollup_sql;
use crate::warehouse::load::LoadJobConfig;
use crate::warehouse::{TableRef, WarehouseClient, WarehouseError};

/// Submit a load job appending one raw transaction CSV archive to
/// `destination`.
pub fn stage_archive(
    client: &impl WarehouseClient,
    destination: &TableRef,
    source_uri: &str,
) -> Result<(), WarehouseError> {
    client.submit_load_job(destination, source_uri, &LoadJobConfig::transaction_csv())?;
    info!(table = %destination, uri = source_uri, "submitted archive load job");
    Ok(())
}

/// Rebuild one local rollup table: provision it fresh, run the matching
/// aggregation query, and stream the result rows in. The whole rebuild runs
/// in a single local transaction; a failure leaves the previous table
/// untouched.
pub fn refresh_dataset(
    client: &impl WarehouseClient,
    conn: &mut Connection,
    dataset: Dataset,
    sources: &SourceTables,
) -> Result<u64> {
    let sql = rollup_sql(dataset, sources);
    let rows = client
        .query(&sql)
        .with_context(|| format!("running {} rollup query", dataset))?;

    let tx = conn
        .transaction()
        .with_context(|| format!("opening transaction for {}", dataset))?;
    provision_table(&tx, dataset)?;
    let loaded = load_rows(&tx, dataset, rows)?;
    tx.commit()
        .with_context(|| format!("committing {} rebuild", dataset))?;

    info!(table = dataset.as_str(), rows = loaded, "rebuilt rollup table");
    Ok(loaded)
}

/// Rebuild all three rollup tables in sequence, returning the per-dataset
/// row counts.
pub fn refresh_all(
    client: &impl WarehouseClient,
    conn: &mut Connection,
    sources: &SourceTables,
) -> Result<Vec<(Dataset, u64)>> {
    let mut counts = Vec::with_capacity(Dataset::ALL.len());
    for dataset in Dataset::ALL {
        let loaded = refresh_dataset(client, conn, dataset, sources)?;
        counts.push((dataset, loaded));
    }
    Ok(counts)
}
