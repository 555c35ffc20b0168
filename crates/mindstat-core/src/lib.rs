//! Core record contracts for mindstat.
//!
//! This crate defines the mental-health indicator record, the closed set of
//! regions and columns, and the errors shared by the generator and the
//! query layer.

pub mod error;
pub mod field;
pub mod record;
pub mod region;
pub mod schema;

pub use error::{Error, Result};
pub use field::{Field, header};
pub use record::{Dataset, Record, parse_year};
pub use region::Region;
pub use schema::record_json_schema;

/// Default file name of the generated dataset.
pub const DEFAULT_DATASET_FILE: &str = "mental_health_data.csv";
