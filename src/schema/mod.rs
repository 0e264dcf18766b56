//! Schema module - raw table intake, canonical field mapping and validation

pub mod normalizer;
pub mod table;
pub mod validator;

pub use normalizer::{
    canonical_headers, canonical_record, CanonicalField, ColumnMap, NormalizedBatch, Normalizer,
    SchemaError,
};
pub use table::RawTable;
pub use validator::ValidationIssue;
