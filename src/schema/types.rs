use serde::{Deserialize, Serialize};

/// Primitive type of a warehouse-side load-schema field, in BigQuery REST
/// casing on the wire.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FieldType {
    #[serde(rename = "TIMESTAMP")]
    Timestamp,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "BOOLEAN")]
    Boolean,
}

/// A single field of a warehouse load schema. The raw transaction feed is
/// sparse, so every field is nullable.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub struct Field {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub mode: FieldMode,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FieldMode {
    #[serde(rename = "NULLABLE")]
    Nullable,
}

impl Field {
    pub const fn nullable(name: &'static str, ty: FieldType) -> Self {
        Field {
            name,
            ty,
            mode: FieldMode::Nullable,
        }
    }
}

/// Column type of a local destination table.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    /// SQL type name used in local DDL.
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "DOUBLE",
        }
    }
}

/// A single column of a local destination table.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Column { name, ty }
    }
}
