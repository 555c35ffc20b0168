use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::loader::{LoadOptions, LoadedDataset, load_dataset_path};
use crate::retrieve::resolve_dataset_path;

/// Loaded datasets keyed by file name, owned by the caller.
///
/// Entries are shared as `Arc`s, so readers can keep a dataset after it has
/// been invalidated or reloaded here.
#[derive(Debug)]
pub struct DatasetCache {
    data_dir: PathBuf,
    options: LoadOptions,
    entries: HashMap<String, Arc<LoadedDataset>>,
}

impl DatasetCache {
    pub fn new(data_dir: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            data_dir: data_dir.into(),
            options,
            entries: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get_or_load(&mut self, file_name: &str) -> Result<Arc<LoadedDataset>> {
        if let Some(entry) = self.entries.get(file_name) {
            debug!(file = %file_name, "dataset cache hit");
            return Ok(Arc::clone(entry));
        }
        debug!(file = %file_name, "dataset cache miss");
        self.reload(file_name)
    }

    /// Load from disk and replace any cached entry.
    pub fn reload(&mut self, file_name: &str) -> Result<Arc<LoadedDataset>> {
        let path = resolve_dataset_path(&self.data_dir, file_name)?;
        let loaded = Arc::new(load_dataset_path(&path, self.options)?);
        self.entries
            .insert(file_name.to_string(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop one entry; returns whether it was cached.
    pub fn invalidate(&mut self, file_name: &str) -> bool {
        self.entries.remove(file_name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
