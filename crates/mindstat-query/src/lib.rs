//! Read-only queries over a loaded mindstat dataset.
//!
//! Covers CSV loading with row-level reporting, a caller-owned cache,
//! region/year filters, per-year averages, two-feature coordinates and the
//! static disorder correlation table.

pub mod cache;
pub mod clusters;
pub mod correlation;
pub mod errors;
pub mod filters;
pub mod loader;
pub mod retrieve;
pub mod series;

pub use cache::DatasetCache;
pub use clusters::{ClusterPoint, coordinates_for};
pub use correlation::{DEFAULT_CORRELATION, correlation_matrix, known_correlation};
pub use errors::{QueryError, Result};
pub use filters::{GLOBAL_REGION, RegionFilter, YearArg, filter_by_region, filter_by_year};
pub use loader::{
    LoadOptions, LoadReport, LoadedDataset, RowIssue, load_dataset_path, load_dataset_reader,
    load_dataset_str,
};
pub use retrieve::{CSV_CONTENT_TYPE, DatasetDownload, fetch_dataset_file, resolve_dataset_path};
pub use series::{TimeSeriesPoint, time_series_for};
