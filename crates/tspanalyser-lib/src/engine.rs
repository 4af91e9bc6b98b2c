//! Tour engine: owns the working dataset and dispatches solve requests.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexIndex};
use crate::node::{IdToNode, Node, NodeId};
use crate::solver::{select_solver, SolverConfig, Tour, TourAlgorithm, TourPath, TourRequest};
use crate::state::SearchState;

/// Graph plus the id lookup built alongside it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub graph: Graph,
    pub id_to_node: IdToNode,
}

impl Dataset {
    pub fn new(graph: Graph, id_to_node: IdToNode) -> Self {
        Self { graph, id_to_node }
    }

    /// Dataset whose id map is derived from the graph's own nodes.
    pub fn from_graph(graph: Graph) -> Self {
        let id_to_node = graph
            .nodes()
            .iter()
            .map(|node| (node.id(), node.clone()))
            .collect();
        Self { graph, id_to_node }
    }
}

/// Entry point for running tour searches against a loaded dataset.
///
/// Solve operations take `&self`: each run works on its own [`SearchState`]
/// so the graph is never mutated and repeated calls see no leftover flags.
#[derive(Debug, Clone, Default)]
pub struct TourEngine {
    dataset: Dataset,
    config: SolverConfig,
}

impl TourEngine {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            dataset: Dataset::default(),
            config,
        }
    }

    pub fn with_dataset(dataset: Dataset, config: SolverConfig) -> Self {
        Self { dataset, config }
    }

    /// Replace the working graph.
    pub fn set_graph(&mut self, graph: Graph) {
        self.dataset.graph = graph;
    }

    /// Replace the id lookup used for start validation and by nearest
    /// neighbour's unvisited set.
    pub fn set_id_to_node(&mut self, id_to_node: IdToNode) {
        self.dataset.id_to_node = id_to_node;
    }

    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.dataset.graph
    }

    pub fn id_to_node(&self) -> &IdToNode {
        &self.dataset.id_to_node
    }

    /// Optimal tour from `start` by exhaustive branch-and-bound.
    pub fn solve_exact(&self, start: NodeId) -> Result<Tour> {
        self.solve(&TourRequest::new(TourAlgorithm::Exact).with_start(start))
    }

    /// Spanning-tree approximation anchored at the default start node.
    pub fn solve_approx(&self) -> Result<Tour> {
        self.solve(&TourRequest::new(TourAlgorithm::Approximate))
    }

    /// Nearest-neighbour tour anchored at the default start node.
    pub fn solve_greedy(&self) -> Result<Tour> {
        self.solve(&TourRequest::new(TourAlgorithm::NearestNeighbour))
    }

    /// Nearest neighbour rescued by a bounded search.
    pub fn solve_recovery_a(&self, start: NodeId) -> Result<Tour> {
        self.solve(&TourRequest::new(TourAlgorithm::RecoverySearch).with_start(start))
    }

    /// Nearest neighbour with bounded backtracking.
    pub fn solve_recovery_b(&self, start: NodeId) -> Result<Tour> {
        self.solve(&TourRequest::new(TourAlgorithm::RecoveryBacktrack).with_start(start))
    }

    /// Run the algorithm named by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchStartVertex`] when the start id is unknown,
    /// before any traversal, [`Error::UnmappedNode`] when the graph and id map
    /// set separately disagree, and [`Error::NoFeasibleTour`] when the solver
    /// cannot produce a closed tour.
    pub fn solve(&self, request: &TourRequest) -> Result<Tour> {
        let start = self.resolve_start(request.start)?;
        self.check_id_map()?;
        let graph = &self.dataset.graph;
        let timer = Instant::now();

        let path = if graph.node_count() == 1 {
            debug!(start = request.start, "single-node graph; returning trivial tour");
            Some(TourPath::trivial(start))
        } else {
            let solver = select_solver(request.algorithm, &self.config);
            let mut state = SearchState::for_graph(graph);
            solver.solve(graph, &self.dataset.id_to_node, &mut state, start)
        };

        let Some(path) = path else {
            return Err(Error::NoFeasibleTour {
                start: request.start,
            });
        };

        let tour = Tour::from_path(request.algorithm, graph, path, timer.elapsed());
        info!(
            algorithm = %tour.algorithm,
            start = request.start,
            cost = tour.cost,
            legs = tour.leg_count(),
            estimated_legs = tour.estimated_legs,
            elapsed_ms = tour.elapsed.as_secs_f64() * 1000.0,
            "tour search completed"
        );
        Ok(tour)
    }

    fn resolve_start(&self, id: NodeId) -> Result<VertexIndex> {
        if !self.dataset.id_to_node.contains_key(&id) {
            return Err(Error::NoSuchStartVertex { id });
        }
        self.dataset
            .graph
            .find_node(id)
            .ok_or(Error::NoSuchStartVertex { id })
    }

    /// Every graph node must be reachable through the id map, otherwise the
    /// nearest-neighbour solvers would close a tour that skips it.
    fn check_id_map(&self) -> Result<()> {
        match self
            .dataset
            .graph
            .nodes()
            .iter()
            .find(|node| !self.dataset.id_to_node.contains_key(&node.id()))
        {
            Some(node) => Err(Error::UnmappedNode { id: node.id() }),
            None => Ok(()),
        }
    }

    /// Look up a node by id in the current dataset.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.dataset.id_to_node.get(&id)
    }
}
