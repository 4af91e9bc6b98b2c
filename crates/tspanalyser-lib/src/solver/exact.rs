//! Depth-first branch-and-bound over Hamiltonian cycles.
//!
//! The search is iterative with an explicit frame stack so it can also run as
//! a bounded continuation on graphs far too deep for native recursion.

use tracing::{debug, warn};

use crate::graph::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

use super::TourPath;

/// Exhaustive search gets slow quickly; above this many nodes a warning is
/// logged before starting.
const EXACT_SIZE_WARNING: usize = 20;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchLimits {
    /// Discard branches whose cost already reaches the best known tour.
    pub pruning: bool,
    /// Maximum number of expansions; `None` searches exhaustively.
    pub attempt_budget: Option<u64>,
    /// Return as soon as any closed tour is found.
    pub stop_at_first: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    pub best: Option<TourPath>,
    pub attempts: u64,
    pub exhausted_budget: bool,
}

struct Frame {
    vertex: VertexIndex,
    weight: f64,
    cursor: usize,
    /// Edge whose subtree is already on the stack above this frame.
    skip: Option<EdgeIndex>,
}

/// Minimum-cost tour starting and ending at `start`.
pub(crate) fn solve_exact(
    graph: &Graph,
    state: &mut SearchState,
    start: VertexIndex,
    pruning: bool,
) -> Option<TourPath> {
    if graph.node_count() > EXACT_SIZE_WARNING {
        warn!(
            nodes = graph.node_count(),
            "running exhaustive search on a large graph; this may take a very long time"
        );
    }
    state.reset();
    let limits = SearchLimits {
        pruning,
        attempt_budget: None,
        stop_at_first: false,
    };
    let outcome = branch_and_bound(graph, state, &[start], &[], limits);
    debug!(attempts = outcome.attempts, "branch-and-bound finished");
    outcome.best
}

/// Depth-first search for the cheapest closed tour through every node.
///
/// `prefix` is the walk already taken (beginning at the tour start) and
/// `arrivals[i]` the edge from `prefix[i]` to `prefix[i + 1]`. The search
/// resumes at the end of the prefix. Exhausting a subtree backtracks into the
/// prefix, where every edge of an earlier node except the one the walk took is
/// still tried, whatever its position in the adjacency list.
///
/// A leg to an unvisited node is taken only while `accumulated + weight` stays
/// below the best complete tour found so far. A leg back to the start is only
/// considered once every node is on the path, and is accepted when strictly
/// cheaper than the best.
pub(crate) fn branch_and_bound(
    graph: &Graph,
    state: &mut SearchState,
    prefix: &[VertexIndex],
    arrivals: &[EdgeIndex],
    limits: SearchLimits,
) -> SearchOutcome {
    let node_count = graph.node_count();
    let mut outcome = SearchOutcome {
        best: None,
        attempts: 0,
        exhausted_budget: false,
    };
    let Some(&start) = prefix.first() else {
        return outcome;
    };

    let mut path: Vec<VertexIndex> = prefix.to_vec();
    let mut stack: Vec<Frame> = Vec::with_capacity(node_count);
    let mut weight = 0.0;
    for (position, &vertex) in prefix.iter().enumerate() {
        state.set_visited(vertex, true);
        let arrival = arrivals.get(position).copied();
        stack.push(Frame {
            vertex,
            weight,
            cursor: 0,
            skip: arrival,
        });
        if let Some(arrival) = arrival {
            weight += graph.edge(arrival).weight;
        }
    }

    let mut best_cost = f64::INFINITY;

    while let Some(frame) = stack.last_mut() {
        let outgoing = graph.outgoing(frame.vertex);
        if frame.cursor == outgoing.len() {
            let vertex = frame.vertex;
            stack.pop();
            // The start stays marked for the whole search.
            if !stack.is_empty() {
                state.set_visited(vertex, false);
                path.pop();
            }
            continue;
        }

        let edge_index = outgoing[frame.cursor];
        frame.cursor += 1;
        if frame.skip == Some(edge_index) {
            continue;
        }
        let weight = frame.weight;

        let edge = graph.edge(edge_index);
        let next = edge.target;
        let closes = next == start && path.len() == node_count;
        if !closes && state.is_visited(next) {
            continue;
        }

        let total = weight + edge.weight;
        if limits.pruning && total >= best_cost {
            continue;
        }

        if closes {
            if total < best_cost {
                best_cost = total;
                let mut vertices = path.clone();
                vertices.push(start);
                outcome.best = Some(TourPath {
                    vertices,
                    cost: total,
                    estimated_legs: 0,
                });
                if limits.stop_at_first {
                    break;
                }
            }
            continue;
        }

        if let Some(budget) = limits.attempt_budget {
            if outcome.attempts >= budget {
                outcome.exhausted_budget = true;
                break;
            }
        }
        outcome.attempts += 1;

        state.set_visited(next, true);
        path.push(next);
        stack.push(Frame {
            vertex: next,
            weight: total,
            cursor: 0,
            skip: None,
        });
    }

    outcome
}
