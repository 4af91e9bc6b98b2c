use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

/// Position of a node inside the graph's node arena.
pub type VertexIndex = usize;

/// Position of a half-edge inside the graph's edge arena.
pub type EdgeIndex = usize;

/// Directed half-edge. An undirected connection is stored as two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: VertexIndex,
    pub target: VertexIndex,
    pub weight: f64,
}

/// Weighted graph used by the tour solvers.
///
/// Nodes and half-edges live in arenas and reference each other by index, so
/// per-run search state can be kept in plain vectors beside the graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, VertexIndex>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeIndex>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its vertex. Adding an id that is already
    /// present leaves the graph untouched and returns the existing vertex.
    pub fn add_node(&mut self, node: Node) -> VertexIndex {
        if let Some(&vertex) = self.index.get(&node.id()) {
            return vertex;
        }
        let vertex = self.nodes.len();
        self.index.insert(node.id(), vertex);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        vertex
    }

    /// Connect two existing nodes in both directions.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        self.add_directed_edge(from, to, weight)?;
        self.add_directed_edge(to, from, weight)?;
        Ok(())
    }

    /// Add a single half-edge from `from` to `to`.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> Result<EdgeIndex> {
        let source = self.find_node(from).ok_or(Error::UnknownNode { id: from })?;
        let target = self.find_node(to).ok_or(Error::UnknownNode { id: to })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { from, to, weight });
        }

        let edge = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
        self.adjacency[source].push(edge);
        Ok(edge)
    }

    /// Resolve a node identifier to its vertex.
    pub fn find_node(&self, id: NodeId) -> Option<VertexIndex> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, vertex: VertexIndex) -> &Node {
        &self.nodes[vertex]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every vertex index, in insertion order.
    pub fn vertices(&self) -> Range<VertexIndex> {
        0..self.nodes.len()
    }

    pub fn edge(&self, edge: EdgeIndex) -> &Edge {
        &self.edges[edge]
    }

    /// Indices of the half-edges leaving `vertex`, in insertion order.
    pub fn outgoing(&self, vertex: VertexIndex) -> &[EdgeIndex] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing half-edges of `vertex`, in insertion order.
    pub fn edges_from(&self, vertex: VertexIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> + '_ {
        self.outgoing(vertex)
            .iter()
            .map(move |&index| (index, &self.edges[index]))
    }

    /// Cheapest half-edge leading from `from` to `to`, if any.
    pub fn edge_between(&self, from: VertexIndex, to: VertexIndex) -> Option<&Edge> {
        self.edges_from(from)
            .map(|(_, edge)| edge)
            .filter(|edge| edge.target == to)
            .min_by(|a, b| compare_weight(a.weight, b.weight))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored half-edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether every ordered pair of distinct vertices is joined by an edge.
    pub fn is_complete(&self) -> bool {
        let mut seen = vec![false; self.node_count()];
        for vertex in self.vertices() {
            seen.iter_mut().for_each(|flag| *flag = false);
            let mut reached = 0;
            for (_, edge) in self.edges_from(vertex) {
                if edge.target != vertex && !seen[edge.target] {
                    seen[edge.target] = true;
                    reached += 1;
                }
            }
            if reached + 1 < self.node_count() {
                return false;
            }
        }
        true
    }
}

/// Total order on weights that sorts NaN last.
pub(crate) fn compare_weight(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        for id in 0..3 {
            graph.add_node(Node::new(id));
        }
        graph.add_edge(0, 1, 5.0).unwrap();
        graph.add_edge(1, 2, 7.0).unwrap();
        graph
    }

    #[test]
    fn adding_existing_id_is_a_no_op() {
        let mut graph = triangle();
        let vertex = graph.add_node(Node::labelled(1, "ignored"));
        assert_eq!(vertex, 1);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node(1).label(), None);
    }

    #[test]
    fn bidirectional_edges_store_two_half_edges() {
        let graph = triangle();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edge_between(0, 1).map(|e| e.weight), Some(5.0));
        assert_eq!(graph.edge_between(1, 0).map(|e| e.weight), Some(5.0));
        assert!(graph.edge_between(0, 2).is_none());
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut graph = triangle();
        graph.add_directed_edge(0, 2, 1.0).unwrap();
        assert!(graph.edge_between(0, 2).is_some());
        assert!(graph.edge_between(2, 0).is_none());
    }

    #[test]
    fn edge_between_prefers_cheapest_parallel_edge() {
        let mut graph = triangle();
        graph.add_directed_edge(0, 1, 2.0).unwrap();
        assert_eq!(graph.edge_between(0, 1).map(|e| e.weight), Some(2.0));
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut graph = triangle();
        let err = graph.add_edge(0, 9, 1.0).unwrap_err();
        assert!(matches!(err, Error::UnknownNode { id: 9 }));
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut graph = triangle();
        let err = graph.add_edge(0, 2, -1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }));
    }

    #[test]
    fn completeness_check() {
        let mut graph = triangle();
        assert!(!graph.is_complete());
        graph.add_edge(0, 2, 3.0).unwrap();
        assert!(graph.is_complete());
    }
}
