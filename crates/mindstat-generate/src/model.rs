use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory the dataset and its report are written to.
    pub out_dir: PathBuf,
    /// File name of the dataset inside `out_dir`.
    pub file_name: String,
    /// Fixed seed; a fresh one is drawn (and reported) when absent.
    pub seed: Option<u64>,
    /// Single-byte column delimiter.
    pub delimiter: u8,
    /// Run id to report; a fresh uuid when absent.
    pub run_id: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("public/data"),
            file_name: mindstat_core::DEFAULT_DATASET_FILE.to_string(),
            seed: None,
            delimiter: b',',
            run_id: None,
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: String,
    pub seed: u64,
    pub start_year: i32,
    pub end_year: i32,
    pub countries: u64,
    pub base_records: u64,
    pub anomaly_records: u64,
    pub total_records: u64,
    pub records_by_region: BTreeMap<String, u64>,
    pub dataset_file: String,
    pub bytes_written: u64,
    pub sha256: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
