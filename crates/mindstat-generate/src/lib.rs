//! Synthetic mental-health dataset generator for mindstat.
//!
//! Produces per-country, per-year indicator records from regional base
//! rates and linear trends, appends fixed anomaly rows, and writes the
//! result as CSV together with a generation report.

pub mod anomalies;
pub mod config;
pub mod engine;
pub mod errors;
pub mod generator;
pub mod model;
pub mod output;
pub mod validate;

pub use anomalies::{ANOMALY_COUNT, anomaly_records};
pub use config::{
    CountrySpec, GeneratorConfig, MAX_YEAR_SPAN, RegionProfile, RegionProfiles, TrendConfig,
    ValueRange,
};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generator::generate;
pub use model::{GenerateOptions, GenerationReport};
pub use validate::{IssueSeverity, ValidationIssue, ValidationReport};
