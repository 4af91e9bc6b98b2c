//! Tour solvers implementing the Strategy pattern.
//!
//! Every algorithm sits behind [`TourSolver`] so the engine can validate the
//! request, build fresh search state and time the run the same way no matter
//! which algorithm is chosen.

use crate::graph::{Graph, VertexIndex};
use crate::node::IdToNode;
use crate::state::SearchState;

use super::approx::solve_approximate;
use super::exact::solve_exact;
use super::greedy::solve_nearest_neighbour;
use super::recovery::{solve_recovery_backtrack, solve_recovery_search};
use super::{SolverConfig, TourAlgorithm, TourPath};

/// Trait for tour search strategies.
pub trait TourSolver: Send + Sync {
    /// The algorithm identifier for this solver.
    fn algorithm(&self) -> TourAlgorithm;

    /// Search for a closed tour anchored at `start`.
    ///
    /// `state` is sized for `graph`; solvers reset it before use. Returns
    /// `None` when no tour can be produced.
    fn solve(
        &self,
        graph: &Graph,
        id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath>;
}

/// Exhaustive branch-and-bound.
#[derive(Debug, Clone)]
pub struct ExactSolver {
    pruning: bool,
}

impl ExactSolver {
    pub fn new(pruning: bool) -> Self {
        Self { pruning }
    }
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TourSolver for ExactSolver {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::Exact
    }

    fn solve(
        &self,
        graph: &Graph,
        _id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath> {
        solve_exact(graph, state, start, self.pruning)
    }
}

/// Spanning-tree walk; never worse than twice the optimum on metric inputs.
#[derive(Debug, Clone, Default)]
pub struct ApproximateSolver;

impl TourSolver for ApproximateSolver {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::Approximate
    }

    fn solve(
        &self,
        graph: &Graph,
        _id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath> {
        solve_approximate(graph, state, start)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NearestNeighbourSolver;

impl TourSolver for NearestNeighbourSolver {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::NearestNeighbour
    }

    fn solve(
        &self,
        graph: &Graph,
        id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath> {
        solve_nearest_neighbour(graph, id_to_node, state, start)
    }
}

/// Nearest neighbour followed by a budgeted branch-and-bound.
#[derive(Debug, Clone)]
pub struct RecoverySearchSolver {
    attempt_budget: u64,
}

impl RecoverySearchSolver {
    pub fn new(attempt_budget: u64) -> Self {
        Self { attempt_budget }
    }
}

impl TourSolver for RecoverySearchSolver {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::RecoverySearch
    }

    fn solve(
        &self,
        graph: &Graph,
        _id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath> {
        solve_recovery_search(graph, state, start, self.attempt_budget)
    }
}

/// Nearest neighbour with budgeted backtracking. Small graphs are solved
/// exactly instead.
#[derive(Debug, Clone)]
pub struct RecoveryBacktrackSolver {
    config: SolverConfig,
}

impl RecoveryBacktrackSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl TourSolver for RecoveryBacktrackSolver {
    fn algorithm(&self) -> TourAlgorithm {
        TourAlgorithm::RecoveryBacktrack
    }

    fn solve(
        &self,
        graph: &Graph,
        _id_to_node: &IdToNode,
        state: &mut SearchState,
        start: VertexIndex,
    ) -> Option<TourPath> {
        solve_recovery_backtrack(graph, state, start, &self.config)
    }
}

/// Select the solver for `algorithm`, configured from `config`.
pub fn select_solver(algorithm: TourAlgorithm, config: &SolverConfig) -> Box<dyn TourSolver> {
    match algorithm {
        TourAlgorithm::Exact => Box::new(ExactSolver::new(config.exact_pruning)),
        TourAlgorithm::Approximate => Box::new(ApproximateSolver),
        TourAlgorithm::NearestNeighbour => Box::new(NearestNeighbourSolver),
        TourAlgorithm::RecoverySearch => {
            Box::new(RecoverySearchSolver::new(config.search_attempt_budget))
        }
        TourAlgorithm::RecoveryBacktrack => Box::new(RecoveryBacktrackSolver::new(*config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn select_solver_chooses_correct_type() {
        let config = SolverConfig::default();
        for algorithm in TourAlgorithm::ALL {
            assert_eq!(select_solver(algorithm, &config).algorithm(), algorithm);
        }
    }

    #[test]
    fn exact_solver_respects_pruning_switch() {
        let mut graph = Graph::new();
        for id in 0..3 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 1, 2.0).unwrap();
        graph.add_edge(1, 2, 3.0).unwrap();
        graph.add_edge(2, 0, 4.0).unwrap();
        let ids = IdToNode::new();

        let mut state = SearchState::for_graph(&graph);
        let pruned = ExactSolver::new(true)
            .solve(&graph, &ids, &mut state, 0)
            .expect("tour");
        let unpruned = ExactSolver::new(false)
            .solve(&graph, &ids, &mut state, 0)
            .expect("tour");
        assert_eq!(pruned.cost, 9.0);
        assert_eq!(pruned.cost, unpruned.cost);
    }
}
