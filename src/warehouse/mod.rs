//! Injected warehouse capability: the thin slice of a cloud warehouse client
//! this crate needs, plus the admin helpers built on top of it.

pub mod load;

use std::fmt;

use tracing::info;

use crate::dataset::Row;
use self::load::LoadJobConfig;

/// Fully-qualified reference to one warehouse table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        TableRef {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

/// Fully-qualified reference to one warehouse dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetRef {
    pub project: String,
    pub dataset: String,
}

impl DatasetRef {
    pub fn new(project: impl Into<String>, dataset: impl Into<String>) -> Self {
        DatasetRef {
            project: project.into(),
            dataset: dataset.into(),
        }
    }

    pub fn table(&self, table: impl Into<String>) -> TableRef {
        TableRef::new(self.project.clone(), self.dataset.clone(), table)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.project, self.dataset)
    }
}

/// Metadata returned for an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    pub reference: TableRef,
    pub num_rows: Option<u64>,
}

/// Errors surfaced by a warehouse client. `NotFound` is the only variant
/// recovered anywhere in this crate; everything else propagates unmodified.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("warehouse backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Lazy, consumed-once stream of aggregated result rows.
pub type RowStream<'a> = Box<dyn Iterator<Item = Result<Row, WarehouseError>> + 'a>;

/// The warehouse operations this crate consumes. Credentials, transport and
/// retry policy all belong to the implementation behind this trait.
pub trait WarehouseClient {
    /// Fetch table metadata. Fails with [`WarehouseError::NotFound`] when the
    /// table does not exist.
    fn get_table(&self, table: &TableRef) -> Result<TableMeta, WarehouseError>;

    /// Resolve a dataset reference, failing with `NotFound` if absent.
    fn get_dataset(&self, dataset: &DatasetRef) -> Result<DatasetRef, WarehouseError>;

    /// List every table currently in `dataset`.
    fn list_tables(&self, dataset: &DatasetRef) -> Result<Vec<TableRef>, WarehouseError>;

    /// Delete one table. With `not_found_ok` the deletion of an already
    /// absent table succeeds.
    fn delete_table(&self, table: &TableRef, not_found_ok: bool) -> Result<(), WarehouseError>;

    /// Submit a bulk-load job ingesting the delimited file at `source_uri`
    /// into `destination` under `config`.
    fn submit_load_job(
        &self,
        destination: &TableRef,
        source_uri: &str,
        config: &LoadJobConfig,
    ) -> Result<(), WarehouseError>;

    /// Run an analytical query, returning rows in the query's declared
    /// column order.
    fn query(&self, sql: &str) -> Result<RowStream<'_>, WarehouseError>;
}

/// Check whether `table` currently exists. A `NotFound` from the client is
/// the negative answer; any other failure propagates.
pub fn table_exists(
    client: &impl WarehouseClient,
    table: &TableRef,
) -> Result<bool, WarehouseError> {
    match client.get_table(table) {
        Ok(_) => Ok(true),
        Err(WarehouseError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Delete every table in `dataset` and return the count removed. Destructive
/// and scoped to exactly the named dataset.
pub fn clean_dataset(
    client: &impl WarehouseClient,
    dataset: &DatasetRef,
) -> Result<u64, WarehouseError> {
    let dataset = client.get_dataset(dataset)?;
    let tables = client.list_tables(&dataset)?;

    let mut num_deleted = 0u64;
    for table in &tables {
        client.delete_table(table, true)?;
        num_deleted += 1;
    }

    info!(dataset = %dataset, deleted = num_deleted, "cleaned out warehouse dataset");
    Ok(num_deleted)
}
