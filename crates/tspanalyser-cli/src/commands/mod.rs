//! Subcommand handlers.
//!
//! Each module handles one CLI subcommand; `main.rs` only parses arguments
//! and dispatches here.

pub mod compare;
pub mod datasets;
pub mod solve;

use std::path::Path;

use anyhow::{Context, Result};
use tspanalyser_lib::{load_dataset, DatasetSelection, SolverConfig, TourEngine};

/// Load `selection` from `data_dir` into a ready-to-run engine.
pub(crate) fn load_engine(
    data_dir: &Path,
    selection: &DatasetSelection,
    config: SolverConfig,
) -> Result<TourEngine> {
    let dataset = load_dataset(data_dir, selection).with_context(|| {
        format!(
            "failed to load dataset {} from {}",
            selection,
            data_dir.display()
        )
    })?;
    Ok(TourEngine::with_dataset(dataset, config))
}
