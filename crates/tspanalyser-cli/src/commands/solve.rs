//! `solve` subcommand: run one algorithm and print the tour.

use std::io;
use std::path::Path;

use anyhow::Result;
use tspanalyser_lib::{TourRequest, TourSummary};

use super::load_engine;
use crate::output::{render_tour_text, write_json, OutputFormat};
use crate::style::TourStyle;
use crate::SolveArgs;

/// Handle the solve subcommand.
///
/// # Errors
///
/// Fails when the dataset cannot be loaded, the start node is unknown or no
/// tour can be built.
pub fn handle_solve(
    data_dir: &Path,
    args: &SolveArgs,
    format: OutputFormat,
    style: &TourStyle,
) -> Result<()> {
    let selection = args.dataset.selection();
    let engine = load_engine(data_dir, &selection, args.tuning.to_config())?;
    let request = TourRequest::new(args.algorithm.into()).with_start(args.start);
    let tour = engine.solve(&request)?;
    let summary = TourSummary::from_tour(&tour);

    match format {
        OutputFormat::Text => print!("{}", render_tour_text(&summary, style)),
        OutputFormat::Json => write_json(&mut io::stdout(), &summary)?,
    }
    Ok(())
}
