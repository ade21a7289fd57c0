pub mod transactions;
pub mod types;

pub use transactions::TRANSACTION_FIELDS;
pub use types::{Column, ColumnType, Field, FieldMode, FieldType};
