use std::sync::OnceLock;

use super::error::LoadError;
use super::loader::{load_dataset, LoaderConfig};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Single-assignment dataset cache
// ---------------------------------------------------------------------------

/// Holds the dataset after its first successful load.
///
/// The cell is assigned at most once and never cleared. A failed load leaves
/// it empty, so the next call reads the file again.
#[derive(Debug)]
pub struct DatasetCache {
    config: LoaderConfig,
    cell: OnceLock<Dataset>,
}

impl DatasetCache {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get(&self) -> Result<&Dataset, LoadError> {
        get_or_load(&self.cell, &self.config)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

static SHARED: OnceLock<Dataset> = OnceLock::new();

/// Process-wide cached load.
///
/// Only the config of the first successful call is honoured; afterwards the
/// same table is returned regardless of `config`.
pub fn load(config: &LoaderConfig) -> Result<&'static Dataset, LoadError> {
    get_or_load(&SHARED, config)
}

fn get_or_load<'a>(
    cell: &'a OnceLock<Dataset>,
    config: &LoaderConfig,
) -> Result<&'a Dataset, LoadError> {
    if let Some(dataset) = cell.get() {
        log::debug!("Dataset cache hit ({} orders)", dataset.len());
        return Ok(dataset);
    }
    let dataset = load_dataset(config)?;
    Ok(cell.get_or_init(|| dataset))
}
