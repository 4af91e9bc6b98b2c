//! tspanalyser CLI library.
//!
//! Argument types, subcommand handlers, tour colouring and output
//! formatting for the `tspanalyser-cli` binary.

pub mod commands;
pub mod output;
pub mod style;

use clap::{Args, ValueEnum};

use tspanalyser_lib::{DatasetKind, DatasetSelection, NodeId, SolverConfig, TourAlgorithm};

/// Dataset family as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetArg {
    Toy,
    Medium,
    RealWorld,
}

impl From<DatasetArg> for DatasetKind {
    fn from(value: DatasetArg) -> Self {
        match value {
            DatasetArg::Toy => DatasetKind::Toy,
            DatasetArg::Medium => DatasetKind::Medium,
            DatasetArg::RealWorld => DatasetKind::RealWorld,
        }
    }
}

/// Tour algorithm as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Exact,
    Approximate,
    NearestNeighbour,
    RecoverySearch,
    RecoveryBacktrack,
}

impl From<AlgorithmArg> for TourAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Exact => TourAlgorithm::Exact,
            AlgorithmArg::Approximate => TourAlgorithm::Approximate,
            AlgorithmArg::NearestNeighbour => TourAlgorithm::NearestNeighbour,
            AlgorithmArg::RecoverySearch => TourAlgorithm::RecoverySearch,
            AlgorithmArg::RecoveryBacktrack => TourAlgorithm::RecoveryBacktrack,
        }
    }
}

/// Which graph to load.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Dataset family.
    #[arg(long, value_enum)]
    pub dataset: DatasetArg,
    /// Graph within the family: a toy graph name (shipping, stadiums,
    /// tourism), a medium size (25 to 900) or a real-world graph (graph1 to
    /// graph3).
    #[arg(long)]
    pub graph: String,
}

impl DatasetArgs {
    pub fn selection(&self) -> DatasetSelection {
        DatasetSelection::new(self.dataset.into(), self.graph.clone())
    }
}

/// Search budgets and switches.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Expansion budget for the recovery search after nearest neighbour gets stuck.
    #[arg(long)]
    pub search_budget: Option<u64>,
    /// Backtrack budget for the backtracking recovery.
    #[arg(long)]
    pub backtrack_budget: Option<u64>,
    /// Graphs up to this many nodes are solved exactly by the backtracking recovery.
    #[arg(long)]
    pub exact_threshold: Option<usize>,
    /// Disable branch-and-bound pruning (exhaustive enumeration).
    #[arg(long)]
    pub no_pruning: bool,
}

impl TuningArgs {
    pub fn to_config(&self) -> SolverConfig {
        let defaults = SolverConfig::default();
        SolverConfig {
            search_attempt_budget: self
                .search_budget
                .unwrap_or(defaults.search_attempt_budget),
            backtrack_budget: self.backtrack_budget.unwrap_or(defaults.backtrack_budget),
            exact_threshold: self.exact_threshold.unwrap_or(defaults.exact_threshold),
            exact_pruning: !self.no_pruning,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Algorithm to run.
    #[arg(long, value_enum)]
    pub algorithm: AlgorithmArg,
    /// Node id the tour starts and ends at.
    #[arg(long, default_value_t = tspanalyser_lib::DEFAULT_START_ID)]
    pub start: NodeId,
    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Node id the tours start and end at.
    #[arg(long, default_value_t = tspanalyser_lib::DEFAULT_START_ID)]
    pub start: NodeId,
    /// Leave the exhaustive search out (useful beyond a few dozen nodes).
    #[arg(long)]
    pub skip_exact: bool,
    #[command(flatten)]
    pub tuning: TuningArgs,
}
