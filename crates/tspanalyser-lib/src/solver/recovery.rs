//! Heuristics for graphs that are not complete.
//!
//! Plain nearest neighbour can walk into a node whose neighbours are all
//! visited. Both variants here still insist on real edges, including the one
//! that closes the cycle, and recover from a dead end with a bounded amount of
//! extra search.

use tracing::{debug, warn};

use crate::graph::{compare_weight, EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

use super::exact::{branch_and_bound, solve_exact, SearchLimits};
use super::greedy::cheapest_unvisited_edge;
use super::{SolverConfig, TourPath};

/// Nearest neighbour over real edges, then a bounded branch-and-bound that
/// resumes from wherever the walk stopped.
///
/// The greedy walk seeds the search stack, so the continuation first tries to
/// close or extend the walk and then backtracks into earlier greedy choices
/// until a closed tour turns up or the attempt budget runs out.
pub(crate) fn solve_recovery_search(
    graph: &Graph,
    state: &mut SearchState,
    start: VertexIndex,
    attempt_budget: u64,
) -> Option<TourPath> {
    state.reset();
    let (prefix, arrivals) = walk_real_edges(graph, state, start);
    if prefix.len() < graph.node_count() {
        debug!(
            stuck_at = graph.node(prefix[prefix.len() - 1]).id(),
            placed = prefix.len(),
            remaining = graph.node_count() - prefix.len(),
            "nearest neighbour got stuck; continuing with bounded search"
        );
    }

    let limits = SearchLimits {
        pruning: true,
        attempt_budget: Some(attempt_budget),
        stop_at_first: true,
    };
    let outcome = branch_and_bound(graph, state, &prefix, &arrivals, limits);
    if outcome.exhausted_budget {
        warn!(attempts = outcome.attempts, "recovery search budget exhausted");
    }
    outcome.best
}

/// Nearest neighbour that backtracks one step at a time out of dead ends.
///
/// Small graphs go straight to the exact solver. Otherwise, when the walk
/// cannot continue (or cannot close back to `start`), the last placed node is
/// removed and the edge that led to it is marked as tried, so the previous
/// node picks its next best option.
pub(crate) fn solve_recovery_backtrack(
    graph: &Graph,
    state: &mut SearchState,
    start: VertexIndex,
    config: &SolverConfig,
) -> Option<TourPath> {
    let node_count = graph.node_count();
    if node_count <= config.exact_threshold {
        debug!(
            nodes = node_count,
            threshold = config.exact_threshold,
            "small graph; delegating to exact search"
        );
        return solve_exact(graph, state, start, config.exact_pruning);
    }

    state.reset();
    state.set_visited(start, true);
    let mut path: Vec<VertexIndex> = vec![start];
    let mut arrivals: Vec<EdgeIndex> = Vec::with_capacity(node_count);
    let mut backtracks: u64 = 0;

    loop {
        let current = path[path.len() - 1];

        if path.len() == node_count {
            if let Some(closing) = graph.edge_between(current, start) {
                let cost = arrivals
                    .iter()
                    .map(|&edge| graph.edge(edge).weight)
                    .sum::<f64>()
                    + closing.weight;
                path.push(start);
                debug!(backtracks, "backtracking recovery closed the tour");
                return Some(TourPath {
                    vertices: path,
                    cost,
                    estimated_legs: 0,
                });
            }
        } else if let Some((edge, target, _)) = cheapest_untried_edge(graph, state, current) {
            state.set_visited(target, true);
            path.push(target);
            arrivals.push(edge);
            continue;
        }

        // Dead end: undo the last placement.
        let arrival = arrivals.pop()?;
        if backtracks >= config.backtrack_budget {
            warn!(backtracks, "backtrack budget exhausted");
            return None;
        }
        backtracks += 1;

        if let Some(removed) = path.pop() {
            state.set_visited(removed, false);
            // Choices tried from the removed node belong to this dead branch.
            for &edge in graph.outgoing(removed) {
                state.set_selected(edge, false);
            }
        }
        state.set_selected(arrival, true);
    }
}

/// Greedy walk that only follows real edges and stops at the first node with
/// no edge to an unvisited node. Returns the visited nodes and the edges taken
/// between them.
fn walk_real_edges(
    graph: &Graph,
    state: &mut SearchState,
    start: VertexIndex,
) -> (Vec<VertexIndex>, Vec<EdgeIndex>) {
    let mut path = vec![start];
    let mut arrivals = Vec::new();
    let mut current = start;
    state.set_visited(start, true);

    while let Some((edge, next, _)) = cheapest_unvisited_edge(graph, state, current) {
        state.set_visited(next, true);
        path.push(next);
        arrivals.push(edge);
        current = next;
    }
    (path, arrivals)
}

fn cheapest_untried_edge(
    graph: &Graph,
    state: &SearchState,
    from: VertexIndex,
) -> Option<(EdgeIndex, VertexIndex, f64)> {
    graph
        .edges_from(from)
        .filter(|(index, edge)| !state.is_visited(edge.target) && !state.is_selected(*index))
        .min_by(|(_, a), (_, b)| {
            compare_weight(a.weight, b.weight)
                .then_with(|| graph.node(a.target).id().cmp(&graph.node(b.target).id()))
        })
        .map(|(index, edge)| (index, edge.target, edge.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    /// Nearest neighbour from 0 walks 0 -> 1 -> 2 -> 3 along the cheap edges
    /// and finds no edge from 3 back to 0. The only cycle is 0-1-3-2-0.
    fn ladder() -> Graph {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        graph.add_edge(0, 2, 5.0).unwrap();
        graph.add_edge(1, 3, 5.0).unwrap();
        graph
    }

    #[test]
    fn search_recovers_from_missing_closing_edge() {
        let graph = ladder();
        let mut state = SearchState::for_graph(&graph);
        let tour = solve_recovery_search(&graph, &mut state, 0, 1_000).expect("tour");
        assert_eq!(tour.vertices, vec![0, 1, 3, 2, 0]);
        assert_eq!(tour.cost, 12.0);
    }

    #[test]
    fn search_takes_greedy_tour_when_it_closes() {
        let mut graph = ladder();
        graph.add_edge(3, 0, 9.0).unwrap();
        let mut state = SearchState::for_graph(&graph);
        let tour = solve_recovery_search(&graph, &mut state, 0, 1_000).expect("tour");
        assert_eq!(tour.vertices, vec![0, 1, 2, 3, 0]);
        assert_eq!(tour.cost, 12.0);
    }

    #[test]
    fn search_gives_up_when_budget_runs_out() {
        let graph = ladder();
        let mut state = SearchState::for_graph(&graph);
        assert!(solve_recovery_search(&graph, &mut state, 0, 0).is_none());
    }

    /// Nearest neighbour walks 0 -> 1 -> 3 -> 4 -> 2 and gets stuck. The way
    /// out is 1 -> 2, which sits before the greedy choice 1 -> 3 in the
    /// adjacency list of 1.
    #[test]
    fn search_retries_edges_listed_before_the_greedy_choice() {
        let mut graph = Graph::new();
        for id in 0..5 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 3, 9.0).unwrap();
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 9.0).unwrap();
        graph.add_edge(1, 3, 1.0).unwrap();
        graph.add_edge(2, 4, 1.0).unwrap();
        graph.add_edge(4, 3, 1.0).unwrap();

        let mut state = SearchState::for_graph(&graph);
        let tour = solve_recovery_search(&graph, &mut state, 0, 1_000).expect("tour");
        assert_eq!(tour.vertices, vec![0, 1, 2, 4, 3, 0]);
        assert_eq!(tour.cost, 21.0);

        let mut exact_state = SearchState::for_graph(&graph);
        let exact = solve_exact(&graph, &mut exact_state, 0, true).expect("tour");
        assert_eq!(exact.cost, tour.cost);
    }

    #[test]
    fn backtracking_delegates_to_exact_on_small_graphs() {
        let graph = ladder();
        let mut state = SearchState::for_graph(&graph);
        let config = SolverConfig::default();
        let tour = solve_recovery_backtrack(&graph, &mut state, 0, &config).expect("tour");
        let mut exact_state = SearchState::for_graph(&graph);
        let exact = solve_exact(&graph, &mut exact_state, 0, true).expect("tour");
        assert_eq!(tour.cost, exact.cost);
    }

    #[test]
    fn backtracking_escapes_dead_end() {
        let graph = ladder();
        let mut state = SearchState::for_graph(&graph);
        let config = SolverConfig {
            exact_threshold: 0,
            ..SolverConfig::default()
        };
        let tour = solve_recovery_backtrack(&graph, &mut state, 0, &config).expect("tour");
        assert_eq!(tour.vertices, vec![0, 1, 3, 2, 0]);
        assert_eq!(tour.cost, 12.0);
    }

    #[test]
    fn backtracking_respects_budget() {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        let mut state = SearchState::for_graph(&graph);
        let config = SolverConfig {
            exact_threshold: 0,
            backtrack_budget: 1,
            ..SolverConfig::default()
        };
        assert!(solve_recovery_backtrack(&graph, &mut state, 0, &config).is_none());
    }
}
