use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::geo::haversine_distance;
use crate::graph::{EdgeIndex, Graph, VertexIndex};
use crate::state::SearchState;

use super::TourPath;

/// Spanning tree grown by Prim's algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Vertices in the order they were extracted from the queue.
    pub order: Vec<VertexIndex>,
    /// Tree edge that attached each vertex; `None` for the root and for
    /// vertices attached through a geographic bridge.
    pub parent: Vec<Option<EdgeIndex>>,
    /// Sum of the attaching edge weights, bridges included.
    pub weight: f64,
    /// Number of geographic bridges needed to join disconnected components.
    pub bridges: usize,
}

/// Grow a minimum spanning tree from `root` with Prim's algorithm.
///
/// The queue is keyed by each vertex's tentative distance in `state`. A
/// cheaper edge re-inserts the vertex and stale entries are skipped on
/// extraction, which stands in for decrease-key. When the real edges run out
/// before every vertex is reached, the nearest outside vertex (by haversine
/// distance to any tree vertex) is attached so the tree always spans the
/// whole graph.
pub fn minimum_spanning_tree(
    graph: &Graph,
    state: &mut SearchState,
    root: VertexIndex,
) -> SpanningTree {
    state.reset();
    let node_count = graph.node_count();
    let mut order = Vec::with_capacity(node_count);
    let mut weight = 0.0;
    let mut bridges = 0;
    let mut queue = BinaryHeap::new();

    state.set_distance(root, 0.0);
    queue.push(QueueEntry::new(root, 0.0));

    loop {
        while let Some(entry) = queue.pop() {
            let vertex = entry.vertex;
            if state.is_visited(vertex) || entry.cost.0 > state.distance(vertex) {
                continue;
            }
            state.set_visited(vertex, true);
            weight += state.distance(vertex);
            order.push(vertex);

            for (edge_index, edge) in graph.edges_from(vertex) {
                let next = edge.target;
                if state.is_visited(next) || edge.weight >= state.distance(next) {
                    continue;
                }
                state.set_distance(next, edge.weight);
                state.set_path(next, Some(edge_index));
                queue.push(QueueEntry::new(next, edge.weight));
            }
        }

        if order.len() == node_count {
            break;
        }
        let Some((outside, distance)) = nearest_outside_vertex(graph, state, &order) else {
            break;
        };
        debug!(
            node = graph.node(outside).id(),
            distance, "bridging disconnected component with haversine distance"
        );
        bridges += 1;
        state.set_distance(outside, distance);
        state.set_path(outside, None);
        queue.push(QueueEntry::new(outside, distance));
    }

    SpanningTree {
        parent: graph.vertices().map(|vertex| state.path(vertex)).collect(),
        order,
        weight,
        bridges,
    }
}

/// Walk the spanning tree from `start` in extraction order and close the
/// cycle. Consecutive nodes without an edge are priced by haversine distance.
pub(crate) fn solve_approximate(
    graph: &Graph,
    state: &mut SearchState,
    start: VertexIndex,
) -> Option<TourPath> {
    let tree = minimum_spanning_tree(graph, state, start);
    if tree.order.len() != graph.node_count() {
        return None;
    }

    let mut vertices = tree.order;
    vertices.push(start);

    let mut cost = 0.0;
    let mut estimated_legs = 0;
    for pair in vertices.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        match graph.edge_between(from, to) {
            Some(edge) => cost += edge.weight,
            None => {
                estimated_legs += 1;
                cost += haversine_distance(graph.node(from).position(), graph.node(to).position());
            }
        }
    }

    Some(TourPath {
        vertices,
        cost,
        estimated_legs,
    })
}

fn nearest_outside_vertex(
    graph: &Graph,
    state: &SearchState,
    tree: &[VertexIndex],
) -> Option<(VertexIndex, f64)> {
    let mut best: Option<(VertexIndex, f64)> = None;
    for outside in graph.vertices().filter(|&v| !state.is_visited(v)) {
        let position = graph.node(outside).position();
        let distance = tree
            .iter()
            .map(|&inside| haversine_distance(graph.node(inside).position(), position))
            .fold(f64::INFINITY, f64::min);
        if best.into_iter().all(|(_, current)| distance < current) {
            best = Some((outside, distance));
        }
    }
    best
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    vertex: VertexIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(vertex: VertexIndex, cost: f64) -> Self {
        Self {
            vertex,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPosition;
    use crate::node::Node;

    #[test]
    fn prim_picks_cheapest_edges() {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(0, 2, 5.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        graph.add_edge(0, 3, 9.0).unwrap();

        let mut state = SearchState::for_graph(&graph);
        let tree = minimum_spanning_tree(&graph, &mut state, 0);
        assert_eq!(tree.order, vec![0, 1, 2, 3]);
        assert_eq!(tree.weight, 4.0);
        assert_eq!(tree.bridges, 0);
        assert_eq!(tree.parent[0], None);
        let parent_of_2 = tree.parent[2].map(|edge| graph.edge(edge).source);
        assert_eq!(parent_of_2, Some(1));
    }

    #[test]
    fn disconnected_components_are_bridged() {
        let mut graph = Graph::new();
        graph.add_node(Node::positioned(0, GeoPosition::new(0.0, 0.0)));
        graph.add_node(Node::positioned(1, GeoPosition::new(0.0, 1.0)));
        graph.add_node(Node::positioned(2, GeoPosition::new(0.0, 2.0)));
        graph.add_edge(0, 1, 10.0).unwrap();

        let mut state = SearchState::for_graph(&graph);
        let tree = minimum_spanning_tree(&graph, &mut state, 0);
        assert_eq!(tree.order, vec![0, 1, 2]);
        assert_eq!(tree.bridges, 1);
        assert_eq!(tree.parent[2], None);

        let tour = solve_approximate(&graph, &mut state, 0).expect("tour");
        assert_eq!(tour.vertices, vec![0, 1, 2, 0]);
        assert_eq!(tour.estimated_legs, 2);
    }
}
