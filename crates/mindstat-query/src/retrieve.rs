use std::path::{Component, Path, PathBuf};

use mindstat_core::DEFAULT_DATASET_FILE;
use serde::Serialize;
use tracing::info;

use crate::errors::{QueryError, Result};

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Raw dataset file ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetDownload {
    pub file_name: String,
    pub content_type: &'static str,
    pub content_disposition: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Resolve a bare file name inside `data_dir`.
///
/// Names with directory components (separators, `..`, absolute paths) are
/// rejected so callers cannot escape the data directory.
pub fn resolve_dataset_path(data_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !file_name.contains(['/', '\\']) => {
            Ok(data_dir.join(file_name))
        }
        _ => Err(QueryError::InvalidFileName(file_name.to_string())),
    }
}

/// Read a dataset file for download; `None` selects the default dataset.
pub fn fetch_dataset_file(data_dir: &Path, file_name: Option<&str>) -> Result<DatasetDownload> {
    let file_name = file_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATASET_FILE);
    let path = resolve_dataset_path(data_dir, file_name)?;

    let bytes = std::fs::read(&path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            QueryError::NotFound(path.clone())
        } else {
            QueryError::Io(err)
        }
    })?;

    info!(file = %file_name, bytes = bytes.len(), "dataset file served");

    Ok(DatasetDownload {
        file_name: file_name.to_string(),
        content_type: CSV_CONTENT_TYPE,
        content_disposition: format!("attachment; filename=\"{file_name}\""),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_names_that_leave_the_data_dir() {
        let dir = Path::new("/srv/data");
        for name in ["../secrets.csv", "nested/data.csv", "/etc/passwd", "..", ".", "a\\b.csv"] {
            assert!(
                matches!(
                    resolve_dataset_path(dir, name),
                    Err(QueryError::InvalidFileName(_))
                ),
                "{name} should be rejected"
            );
        }
        assert_eq!(
            resolve_dataset_path(dir, "mental_health_data.csv").expect("plain name"),
            dir.join("mental_health_data.csv")
        );
    }
}
