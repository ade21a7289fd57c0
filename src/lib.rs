//! Helpers for moving retail point-of-sale transaction archives out of a
//! cloud warehouse into a local DuckDB rollup store.
//!
//! The warehouse side is an injected [`warehouse::WarehouseClient`]
//! capability; this crate owns the dataset registry (schema + query + insert
//! kept in lock-step per [`dataset::Dataset`]), the staging load-job shape,
//! and the local provision/load routines.

pub mod config;
pub mod dataset;
pub mod local;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod warehouse;

pub use config::{EtlConfig, SourceTables};
pub use dataset::{Dataset, Row, UnrecognizedDataset, Value};
pub use local::{load_rows, provision_table};
pub use pipeline::{refresh_all, refresh_dataset, stage_archive};
pub use query::rollup_sql;
pub use warehouse::load::LoadJobConfig;
pub use warehouse::{clean_dataset, table_exists, WarehouseClient, WarehouseError};
