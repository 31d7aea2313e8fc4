//! Core data types shared across the mesa crates.

mod record;

pub use record::{FieldValue, Record, RecordSet};
