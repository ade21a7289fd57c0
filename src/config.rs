//! Pipeline configuration: where the raw archives live in the warehouse and
//! where the local rollup store sits on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::warehouse::DatasetRef;

fn default_transactions_table() -> String {
    // Wildcard over the per-quarter archive tables.
    "transArchive_*".to_string()
}

fn default_department_lookup_table() -> String {
    "department_lookup".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtlConfig {
    /// Cloud project holding the staging dataset.
    pub project_id: String,
    /// Staging dataset containing the raw archive tables.
    pub dataset_id: String,
    #[serde(default = "default_transactions_table")]
    pub transactions_table: String,
    #[serde(default = "default_department_lookup_table")]
    pub department_lookup_table: String,
    /// Path of the local rollup database file.
    pub local_db: PathBuf,
}

/// Fully-rendered source table expressions the rollup queries select from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTables {
    pub transactions: String,
    pub department_lookup: String,
}

impl EtlConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {:?}", path))
    }

    /// The staging dataset the cleaner and load jobs operate on.
    pub fn staging_dataset(&self) -> DatasetRef {
        DatasetRef::new(self.project_id.clone(), self.dataset_id.clone())
    }

    /// Backtick-quoted table expressions for query rendering.
    pub fn source_tables(&self) -> SourceTables {
        SourceTables {
            transactions: format!(
                "`{}.{}.{}`",
                self.project_id, self.dataset_id, self.transactions_table
            ),
            department_lookup: format!(
                "`{}.{}.{}`",
                self.project_id, self.dataset_id, self.department_lookup_table
            ),
        }
    }
}
