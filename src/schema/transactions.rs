//! The fixed load schema for raw point-of-sale transaction archives.
//!
//! Column order matters: CSV archives carry no header row, so the bulk
//! loader binds fields by position.

use once_cell::sync::Lazy;

use super::types::Field;
use super::types::FieldType::{Boolean, Float, String as Str, Timestamp};

/// Ordered field list of the raw `transArchive` tables.
pub static TRANSACTION_FIELDS: Lazy<Vec<Field>> = Lazy::new(|| {
    vec![
        Field::nullable("datetime", Timestamp),
        Field::nullable("register_no", Float),
        Field::nullable("emp_no", Float),
        Field::nullable("trans_no", Float),
        Field::nullable("upc", Str),
        Field::nullable("description", Str),
        Field::nullable("trans_type", Str),
        Field::nullable("trans_subtype", Str),
        Field::nullable("trans_status", Str),
        Field::nullable("department", Float),
        Field::nullable("quantity", Float),
        Field::nullable("Scale", Float),
        Field::nullable("cost", Float),
        Field::nullable("unitPrice", Float),
        Field::nullable("total", Float),
        Field::nullable("regPrice", Float),
        Field::nullable("altPrice", Float),
        Field::nullable("tax", Float),
        Field::nullable("taxexempt", Float),
        Field::nullable("foodstamp", Float),
        Field::nullable("wicable", Float),
        Field::nullable("discount", Float),
        Field::nullable("memDiscount", Float),
        Field::nullable("discountable", Float),
        Field::nullable("discounttype", Float),
        Field::nullable("voided", Float),
        Field::nullable("percentDiscount", Float),
        Field::nullable("ItemQtty", Float),
        Field::nullable("volDiscType", Float),
        Field::nullable("volume", Float),
        Field::nullable("VolSpecial", Float),
        Field::nullable("mixMatch", Float),
        Field::nullable("matched", Float),
        Field::nullable("memType", Boolean),
        Field::nullable("staff", Boolean),
        Field::nullable("numflag", Float),
        Field::nullable("itemstatus", Float),
        Field::nullable("tenderstatus", Float),
        Field::nullable("charflag", Str),
        Field::nullable("varflag", Float),
        Field::nullable("batchHeaderID", Boolean),
        Field::nullable("local", Float),
        Field::nullable("organic", Float),
        Field::nullable("display", Boolean),
        Field::nullable("receipt", Float),
        Field::nullable("card_no", Float),
        Field::nullable("store", Float),
        Field::nullable("branch", Float),
        Field::nullable("match_id", Float),
        Field::nullable("trans_id", Float),
    ]
});
