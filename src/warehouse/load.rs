//! Bulk-load job configuration for staging raw transaction CSVs.

use serde::Serialize;

use crate::schema::{Field, TRANSACTION_FIELDS};

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum WriteDisposition {
    /// Append to the destination; never overwrite or truncate.
    #[serde(rename = "WRITE_APPEND")]
    Append,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum SchemaUpdateOption {
    /// Let a load add new trailing fields to the destination table.
    #[serde(rename = "ALLOW_FIELD_ADDITION")]
    AllowFieldAddition,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum SourceFormat {
    #[serde(rename = "CSV")]
    Csv,
}

/// Immutable specification of one bulk-import job. Built once and handed to
/// [`WarehouseClient::submit_load_job`]; the transfer itself is the client's
/// job.
///
/// [`WarehouseClient::submit_load_job`]: super::WarehouseClient::submit_load_job
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoadJobConfig {
    pub write_disposition: WriteDisposition,
    pub schema_update_options: Vec<SchemaUpdateOption>,
    pub source_format: SourceFormat,
    pub schema: Vec<Field>,
}

impl LoadJobConfig {
    /// The one job shape this pipeline submits: append a raw transaction CSV
    /// archive under the fixed 50-field schema.
    pub fn transaction_csv() -> Self {
        LoadJobConfig {
            write_disposition: WriteDisposition::Append,
            schema_update_options: vec![SchemaUpdateOption::AllowFieldAddition],
            source_format: SourceFormat::Csv,
            schema: TRANSACTION_FIELDS.clone(),
        }
    }
}
