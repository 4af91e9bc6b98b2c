//! Output formatting for tour rendering.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use tspanalyser_lib::{DatasetSelection, TourAlgorithm, TourSummary};

use crate::style::{Tint, TourStyle};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Outcome of one algorithm within a comparison.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonRow {
    pub algorithm: TourAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour: Option<TourSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Render a single tour as text.
pub fn render_tour_text(summary: &TourSummary, style: &TourStyle) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{} {} cost {} over {} legs",
        style.paint(Tint::Heading, format_args!("Tour from {}", summary.start)),
        style.paint(Tint::Algorithm, format_args!("({})", summary.algorithm)),
        style.paint(Tint::Cost, format_args!("{:.2}", summary.cost)),
        summary.legs
    );
    if summary.estimated_legs > 0 {
        let _ = writeln!(
            buffer,
            "{}",
            style.paint(
                Tint::Estimate,
                format_args!(
                    "{} leg(s) priced by great-circle distance",
                    summary.estimated_legs
                )
            )
        );
    }
    for stop in &summary.stops {
        let _ = writeln!(
            buffer,
            "{} {}",
            style.paint(Tint::Muted, format_args!("{:>5}:", stop.index)),
            stop.display_name()
        );
    }
    let _ = writeln!(
        buffer,
        "{}",
        style.paint(Tint::Muted, format_args!("Completed in {:.3} ms", summary.elapsed_ms))
    );
    buffer
}

/// Render a comparison table, one line per algorithm.
pub fn render_comparison_text(
    selection: &DatasetSelection,
    rows: &[ComparisonRow],
    style: &TourStyle,
) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}",
        style.paint(Tint::Heading, format_args!("Comparison on {selection}"))
    );
    for row in rows {
        match (&row.tour, &row.error) {
            (Some(summary), _) => {
                let _ = writeln!(buffer, "{}", summary.render_compact());
            }
            (None, Some(error)) => {
                let _ = writeln!(
                    buffer,
                    "{:<20} {}",
                    row.algorithm.to_string(),
                    style.paint(Tint::Failure, format_args!("failed: {error}"))
                );
            }
            (None, None) => {}
        }
    }
    buffer
}

/// Write any serialisable value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn write_json<T: Serialize>(writer: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).map_err(io::Error::other)?;
    writer.write_all(b"\n")?;
    Ok(())
}
