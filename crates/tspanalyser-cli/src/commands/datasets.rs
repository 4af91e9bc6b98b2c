//! `datasets` subcommand: list the graphs present in the data directory.

use std::io;
use std::path::Path;

use anyhow::Result;
use tspanalyser_lib::available_datasets;

use crate::output::{write_json, OutputFormat};
use crate::style::{Tint, TourStyle};

pub fn handle_datasets(
    data_dir: &Path,
    format: OutputFormat,
    style: &TourStyle,
) -> Result<()> {
    let available = available_datasets(data_dir);

    match format {
        OutputFormat::Json => write_json(&mut io::stdout(), &available)?,
        OutputFormat::Text => {
            println!(
                "{}",
                style.paint(
                    Tint::Heading,
                    format_args!("Datasets under {}", data_dir.display())
                )
            );
            if available.is_empty() {
                println!("{}", style.paint(Tint::Muted, "  (none found)"));
            }
            for selection in &available {
                println!(
                    "  --dataset {} --graph {}",
                    style.paint(Tint::Algorithm, selection.kind),
                    selection.graph
                );
            }
        }
    }
    Ok(())
}
