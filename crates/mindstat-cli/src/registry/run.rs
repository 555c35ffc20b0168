use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use mindstat_generate::{GenerationReport, GeneratorConfig};
use serde::Serialize;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub runs_dir: PathBuf,
    pub dataset_path: PathBuf,
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub cli_version: &'static str,
    pub dataset_path: String,
    pub seed: Option<u64>,
    pub generator: &'a GeneratorConfig,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.runs_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");
    let report_path = root.join("generation_report.json");

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION"),
        dataset_path: ctx.dataset_path.display().to_string(),
        seed: ctx.seed,
        generator: &ctx.generator,
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        logs_path,
        report_path,
    })
}

pub fn write_run_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_json(&paths.report_path, report)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_run_creates_config_and_log_files() {
        let runs_dir = std::env::temp_dir().join(format!("mindstat_runs_{}", uuid::Uuid::new_v4()));
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at: Utc::now(),
            runs_dir: runs_dir.clone(),
            dataset_path: PathBuf::from("public/data/mental_health_data.csv"),
            seed: Some(7),
            generator: GeneratorConfig::default(),
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.starts_with(&runs_dir));
        assert!(
            paths
                .root
                .file_name()
                .map(|name| name.to_string_lossy().ends_with("__run_abc"))
                .unwrap_or(false)
        );
        assert!(paths.logs_path.exists());

        let config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(paths.root.join("config.json")).expect("read config"),
        )
        .expect("parse config");
        assert_eq!(config["run_id"], "abc");
        assert_eq!(config["seed"], 7);
        assert_eq!(config["generator"]["start_year"], 2010);

        let _ = std::fs::remove_dir_all(&runs_dir);
    }
}
