use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tspanalyser_cli::commands::{compare, datasets, solve};
use tspanalyser_cli::output::OutputFormat;
use tspanalyser_cli::style::TourStyle;
use tspanalyser_cli::{CompareArgs, SolveArgs};
use tspanalyser_lib::resolve_data_dir;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Travelling Salesman tour search over CSV graph datasets"
)]
struct Cli {
    /// Directory holding Toy-Graphs, Extra_Fully_Connected_Graphs and
    /// Real-World Graphs. Defaults to TSPANALYSER_DATA_DIR or the platform
    /// data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one algorithm and print the resulting tour.
    Solve(SolveArgs),
    /// Run every algorithm on the same graph and summarise the results.
    Compare(CompareArgs),
    /// List the datasets found in the data directory.
    Datasets,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_dir =
        resolve_data_dir(cli.data_dir.as_deref()).context("failed to resolve the data directory")?;
    let style = TourStyle::from_environment(cli.no_color);

    match &cli.command {
        Command::Solve(args) => solve::handle_solve(&data_dir, args, cli.format, &style),
        Command::Compare(args) => compare::handle_compare(&data_dir, args, cli.format, &style),
        Command::Datasets => datasets::handle_datasets(&data_dir, cli.format, &style),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
