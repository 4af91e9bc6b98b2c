use std::collections::HashSet;

use tracing::debug;

use crate::geo::haversine_distance;
use crate::graph::{compare_weight, EdgeIndex, Graph, VertexIndex};
use crate::node::IdToNode;
use crate::state::SearchState;

use super::TourPath;

/// Nearest-neighbour tour from `start`.
///
/// Each step follows the cheapest edge to an unvisited node. When the current
/// node has no such edge, the geographically nearest node still in the
/// unvisited set is chosen and the leg is priced by haversine distance. The
/// closing leg uses a real edge when one exists.
pub(crate) fn solve_nearest_neighbour(
    graph: &Graph,
    id_to_node: &IdToNode,
    state: &mut SearchState,
    start: VertexIndex,
) -> Option<TourPath> {
    state.reset();
    let mut unvisited: HashSet<VertexIndex> = id_to_node
        .keys()
        .filter_map(|&id| graph.find_node(id))
        .collect();

    let mut vertices = Vec::with_capacity(graph.node_count() + 1);
    let mut cost = 0.0;
    let mut estimated_legs = 0;
    let mut current = start;

    state.set_visited(start, true);
    unvisited.remove(&start);
    vertices.push(start);

    while !unvisited.is_empty() {
        let next = match cheapest_unvisited_edge(graph, state, current) {
            Some((_, target, weight)) => {
                cost += weight;
                target
            }
            None => {
                let (target, distance) = nearest_by_position(graph, &unvisited, current)?;
                debug!(
                    from = graph.node(current).id(),
                    to = graph.node(target).id(),
                    distance,
                    "no edge to an unvisited node; falling back to haversine distance"
                );
                estimated_legs += 1;
                cost += distance;
                target
            }
        };

        state.set_visited(next, true);
        unvisited.remove(&next);
        vertices.push(next);
        current = next;
    }

    match graph.edge_between(current, start) {
        Some(edge) => cost += edge.weight,
        None => {
            estimated_legs += 1;
            cost += haversine_distance(
                graph.node(current).position(),
                graph.node(start).position(),
            );
        }
    }
    vertices.push(start);

    Some(TourPath {
        vertices,
        cost,
        estimated_legs,
    })
}

/// Cheapest edge from `from` to a node not yet visited. Ties go to the lower
/// node id so repeated runs agree.
pub(crate) fn cheapest_unvisited_edge(
    graph: &Graph,
    state: &SearchState,
    from: VertexIndex,
) -> Option<(EdgeIndex, VertexIndex, f64)> {
    graph
        .edges_from(from)
        .filter(|(_, edge)| !state.is_visited(edge.target))
        .min_by(|(_, a), (_, b)| {
            compare_weight(a.weight, b.weight)
                .then_with(|| graph.node(a.target).id().cmp(&graph.node(b.target).id()))
        })
        .map(|(index, edge)| (index, edge.target, edge.weight))
}

fn nearest_by_position(
    graph: &Graph,
    candidates: &HashSet<VertexIndex>,
    from: VertexIndex,
) -> Option<(VertexIndex, f64)> {
    let origin = graph.node(from).position();
    candidates
        .iter()
        .map(|&vertex| {
            (
                vertex,
                haversine_distance(origin, graph.node(vertex).position()),
            )
        })
        .min_by(|(a, da), (b, db)| {
            compare_weight(*da, *db).then_with(|| graph.node(*a).id().cmp(&graph.node(*b).id()))
        })
}
