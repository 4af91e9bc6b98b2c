//! `compare` subcommand: run every algorithm on one graph.

use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::debug;
use tspanalyser_lib::{TourAlgorithm, TourRequest, TourSummary};

use super::load_engine;
use crate::output::{render_comparison_text, write_json, ComparisonRow, OutputFormat};
use crate::style::TourStyle;
use crate::CompareArgs;

/// Handle the compare subcommand.
///
/// Per-algorithm failures become rows in the report; only a dataset that
/// cannot be loaded fails the command.
pub fn handle_compare(
    data_dir: &Path,
    args: &CompareArgs,
    format: OutputFormat,
    style: &TourStyle,
) -> Result<()> {
    let selection = args.dataset.selection();
    let engine = load_engine(data_dir, &selection, args.tuning.to_config())?;

    let rows = TourAlgorithm::ALL
        .into_iter()
        .filter(|algorithm| !(args.skip_exact && *algorithm == TourAlgorithm::Exact))
        .map(|algorithm| {
            let request = TourRequest::new(algorithm).with_start(args.start);
            match engine.solve(&request) {
                Ok(tour) => ComparisonRow {
                    algorithm,
                    tour: Some(TourSummary::from_tour(&tour)),
                    error: None,
                },
                Err(err) => {
                    debug!(%algorithm, error = %err, "algorithm failed during comparison");
                    ComparisonRow {
                        algorithm,
                        tour: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect::<Vec<_>>();

    match format {
        OutputFormat::Text => print!("{}", render_comparison_text(&selection, &rows, style)),
        OutputFormat::Json => write_json(&mut io::stdout(), &rows)?,
    }
    Ok(())
}
