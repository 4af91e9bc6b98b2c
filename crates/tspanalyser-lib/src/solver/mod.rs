//! Tour search algorithms.
//!
//! This module provides:
//! - [`TourAlgorithm`] - Supported tour algorithms
//! - [`SolverConfig`] - Budgets and switches shared by the solvers
//! - [`TourRequest`] - Which algorithm to run and from where
//! - [`Tour`] - Closed tour returned to the caller
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`TourSolver`] implementation, and
//! [`select_solver`] picks the one matching a request. The engine only ever
//! talks to the trait, so new algorithms slot in without touching it.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tspanalyser_lib::{load_dataset, DatasetSelection, TourEngine, SolverConfig};
//!
//! let dataset = load_dataset(Path::new("data"), &DatasetSelection::toy("tourism")).unwrap();
//! let engine = TourEngine::with_dataset(dataset, SolverConfig::default());
//! let tour = engine.solve_exact(0).unwrap();
//! println!("cost {} over {} legs", tour.cost, tour.leg_count());
//! ```

mod approx;
mod exact;
mod greedy;
mod recovery;
mod strategy;

pub use approx::{minimum_spanning_tree, SpanningTree};
pub use strategy::{
    select_solver, ApproximateSolver, ExactSolver, NearestNeighbourSolver,
    RecoveryBacktrackSolver, RecoverySearchSolver, TourSolver,
};

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::graph::{Graph, VertexIndex};
use crate::node::{Node, NodeId};

/// Start node used by the algorithms whose contract fixes the tour anchor.
pub const DEFAULT_START_ID: NodeId = 0;

/// Supported tour algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourAlgorithm {
    /// Exhaustive branch-and-bound; optimal but exponential.
    Exact,
    /// Prim minimum spanning tree walked in extraction order.
    Approximate,
    /// Greedy nearest neighbour with a great-circle fallback.
    NearestNeighbour,
    /// Nearest neighbour rescued by a bounded branch-and-bound continuation.
    RecoverySearch,
    /// Nearest neighbour with bounded edge-level backtracking.
    RecoveryBacktrack,
}

impl TourAlgorithm {
    pub const ALL: [TourAlgorithm; 5] = [
        TourAlgorithm::Exact,
        TourAlgorithm::Approximate,
        TourAlgorithm::NearestNeighbour,
        TourAlgorithm::RecoverySearch,
        TourAlgorithm::RecoveryBacktrack,
    ];

    /// Whether the algorithm may close gaps with the haversine estimate
    /// instead of a real edge.
    pub fn uses_estimates(self) -> bool {
        matches!(
            self,
            TourAlgorithm::Approximate | TourAlgorithm::NearestNeighbour
        )
    }
}

impl fmt::Display for TourAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TourAlgorithm::Exact => "exact",
            TourAlgorithm::Approximate => "approximate",
            TourAlgorithm::NearestNeighbour => "nearest-neighbour",
            TourAlgorithm::RecoverySearch => "recovery-search",
            TourAlgorithm::RecoveryBacktrack => "recovery-backtrack",
        };
        f.write_str(value)
    }
}

/// Tunables shared by the solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of recursive expansions the recovery search may make
    /// after nearest neighbour gets stuck.
    pub search_attempt_budget: u64,
    /// Maximum number of single-step backtracks for the backtracking recovery.
    pub backtrack_budget: u64,
    /// Graphs with at most this many nodes are handed to the exact solver by
    /// the backtracking recovery.
    pub exact_threshold: usize,
    /// Apply the `accumulated + weight >= best` bound in branch-and-bound.
    pub exact_pruning: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search_attempt_budget: 1_000_000,
            backtrack_budget: 100_000,
            exact_threshold: 12,
            exact_pruning: true,
        }
    }
}

/// Request passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourRequest {
    pub algorithm: TourAlgorithm,
    pub start: NodeId,
}

impl TourRequest {
    /// Request anchored at [`DEFAULT_START_ID`].
    pub fn new(algorithm: TourAlgorithm) -> Self {
        Self {
            algorithm,
            start: DEFAULT_START_ID,
        }
    }

    pub fn with_start(mut self, start: NodeId) -> Self {
        self.start = start;
        self
    }
}

/// Closed walk produced by a solver, expressed in vertex indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPath {
    /// Visiting order; the first and last entries are the start vertex.
    pub vertices: Vec<VertexIndex>,
    pub cost: f64,
    /// Legs whose cost is a haversine estimate rather than an edge weight.
    pub estimated_legs: usize,
}

impl TourPath {
    pub(crate) fn trivial(start: VertexIndex) -> Self {
        Self {
            vertices: vec![start, start],
            cost: 0.0,
            estimated_legs: 0,
        }
    }
}

/// Tour returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub algorithm: TourAlgorithm,
    /// Nodes in visiting order, closing back on the start node.
    pub nodes: Vec<Node>,
    pub cost: f64,
    pub estimated_legs: usize,
    pub elapsed: Duration,
}

impl Tour {
    pub(crate) fn from_path(
        algorithm: TourAlgorithm,
        graph: &Graph,
        path: TourPath,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm,
            nodes: path
                .vertices
                .iter()
                .map(|&vertex| graph.node(vertex).clone())
                .collect(),
            cost: path.cost,
            estimated_legs: path.estimated_legs,
            elapsed,
        }
    }

    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Number of legs travelled, including the closing one.
    pub fn leg_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Identifiers in visiting order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(Node::id).collect()
    }
}
