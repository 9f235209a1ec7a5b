//! Core contracts and helpers for synthgen.
//!
//! This crate defines the field schema, cell values, the column-oriented
//! dataset, schema validation, and the cross-field consistency rules shared by
//! the generator and the validator.

pub mod consistency;
pub mod dataset;
pub mod error;
pub mod schema;
pub mod validation;
pub mod value;

pub use consistency::{
    CONSISTENCY_RULES, ConsistencyIssue, ConsistencyRule, FieldIssue, check_row,
    check_row_detailed,
};
pub use dataset::{Column, Dataset};
pub use error::{Error, Result};
pub use schema::{FieldDef, FieldKind, FieldSpec, Schema};
pub use validation::{check_schema, parse_schema, validate_schema};
pub use value::{Row, Value};

/// JSON Schema describing the schema document format.
pub fn schema_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Schema)
}
