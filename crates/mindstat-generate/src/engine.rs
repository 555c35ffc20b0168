use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use mindstat_core::Dataset;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::anomalies::ANOMALY_COUNT;
use crate::config::GeneratorConfig;
use crate::errors::GenerationError;
use crate::generator::generate;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::atomic::{write_bytes_atomic, write_json_atomic};
use crate::output::csv::dataset_to_csv;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating and persisting a dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn run(&self, config: &GeneratorConfig) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let validation = config.validate();
        if !validation.is_ok() {
            warn!(
                errors = validation.errors.len(),
                "generator config rejected"
            );
            return Err(GenerationError::InvalidConfig(validation));
        }
        for issue in &validation.warnings {
            warn!(code = %issue.code, path = %issue.path, "{}", issue.message);
        }

        let run_id = self
            .options
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let started_at = chrono::Utc::now().to_rfc3339();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());

        info!(
            run_id = %run_id,
            seed,
            countries = config.countries.len(),
            start_year = config.start_year,
            end_year = config.end_year,
            "generation started"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dataset = generate(config, &mut rng);
        let bytes = dataset_to_csv(&dataset, self.options.delimiter)?;

        let dataset_path = self.options.out_dir.join(&self.options.file_name);
        write_bytes_atomic(&dataset_path, &bytes)?;
        info!(
            path = %dataset_path.display(),
            rows = dataset.len(),
            bytes = bytes.len(),
            "dataset written"
        );

        let mut records_by_region = BTreeMap::new();
        for record in &dataset {
            *records_by_region
                .entry(record.region.to_string())
                .or_insert(0_u64) += 1;
        }

        let report = GenerationReport {
            run_id: run_id.clone(),
            started_at,
            seed,
            start_year: config.start_year,
            end_year: config.end_year,
            countries: config.countries.len() as u64,
            base_records: (dataset.len() - ANOMALY_COUNT) as u64,
            anomaly_records: ANOMALY_COUNT as u64,
            total_records: dataset.len() as u64,
            records_by_region,
            dataset_file: self.options.file_name.clone(),
            bytes_written: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
            duration_ms: start.elapsed().as_millis() as u64,
            warnings: validation
                .warnings
                .iter()
                .map(|issue| format!("{}: {}", issue.path, issue.message))
                .collect(),
        };

        let report_path = self.report_path();
        write_json_atomic(&report_path, &report)?;

        info!(
            run_id = %run_id,
            total_records = report.total_records,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            dataset_path,
            report_path,
            dataset,
            report,
        })
    }

    /// `<stem>.report.json` next to the dataset file.
    pub fn report_path(&self) -> PathBuf {
        let stem = std::path::Path::new(&self.options.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        self.options.out_dir.join(format!("{stem}.report.json"))
    }
}
