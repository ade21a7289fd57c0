//! The closed set of rollup datasets, keeping local schema, insert
//! statement, and aggregation query in lock-step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schema::{Column, ColumnType};

/// Logical rollup dataset. Selects schema, aggregation query, and insertion
/// routine together; code holding a `Dataset` can never see an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    DateHour,
    OwnerYearMonth,
    ProductYearMonth,
}

/// Raised when a string identifier is not one of the known datasets.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized dataset identifier `{0}`")]
pub struct UnrecognizedDataset(pub String);

impl Dataset {
    pub const ALL: [Dataset; 3] = [
        Dataset::DateHour,
        Dataset::OwnerYearMonth,
        Dataset::ProductYearMonth,
    ];

    /// The identifier used both as the local table name and as the logical
    /// dataset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::DateHour => "date_hour",
            Dataset::OwnerYearMonth => "owner_year_month",
            Dataset::ProductYearMonth => "product_year_month",
        }
    }

    /// The fixed column list of the local destination table.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Dataset::DateHour => &DATE_HOUR_COLUMNS,
            Dataset::OwnerYearMonth => &OWNER_YEAR_MONTH_COLUMNS,
            Dataset::ProductYearMonth => &PRODUCT_YEAR_MONTH_COLUMNS,
        }
    }
}

const DATE_HOUR_COLUMNS: [Column; 5] = [
    Column::new("date", ColumnType::Text),
    Column::new("hour", ColumnType::Integer),
    Column::new("sales", ColumnType::Real),
    Column::new("transactions", ColumnType::Integer),
    Column::new("items", ColumnType::Integer),
];

const OWNER_YEAR_MONTH_COLUMNS: [Column; 6] = [
    Column::new("card_no", ColumnType::Integer),
    Column::new("year", ColumnType::Integer),
    Column::new("month", ColumnType::Integer),
    Column::new("sales", ColumnType::Real),
    Column::new("transactions", ColumnType::Integer),
    Column::new("items", ColumnType::Integer),
];

const PRODUCT_YEAR_MONTH_COLUMNS: [Column; 9] = [
    Column::new("upc", ColumnType::Text),
    Column::new("description", ColumnType::Text),
    Column::new("dept_num", ColumnType::Integer),
    Column::new("dept_name", ColumnType::Text),
    Column::new("year", ColumnType::Integer),
    Column::new("month", ColumnType::Integer),
    Column::new("sales", ColumnType::Real),
    Column::new("transactions", ColumnType::Integer),
    Column::new("items", ColumnType::Integer),
];

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = UnrecognizedDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_hour" => Ok(Dataset::DateHour),
            "owner_year_month" => Ok(Dataset::OwnerYearMonth),
            "product_year_month" => Ok(Dataset::ProductYearMonth),
            other => Err(UnrecognizedDataset(other.to_string())),
        }
    }
}

/// One cell of an aggregated result row, as handed back by the warehouse
/// client. Inserted positionally; there is no name-based binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

/// One aggregated result row, in the column order declared by
/// [`Dataset::columns`].
pub type Row = Vec<Value>;
