//! Transient per-run search state.
//!
//! Solvers never mutate the graph. Everything they mark while searching lives
//! in a [`SearchState`] sized for one graph and indexed by vertex or edge.

use crate::graph::{EdgeIndex, Graph, VertexIndex};

#[derive(Debug, Clone)]
pub struct SearchState {
    visited: Vec<bool>,
    distance: Vec<f64>,
    path: Vec<Option<EdgeIndex>>,
    selected: Vec<bool>,
}

impl SearchState {
    /// Fresh state for `graph`: nothing visited, every distance infinite.
    pub fn for_graph(graph: &Graph) -> Self {
        Self {
            visited: vec![false; graph.node_count()],
            distance: vec![f64::INFINITY; graph.node_count()],
            path: vec![None; graph.node_count()],
            selected: vec![false; graph.edge_count()],
        }
    }

    /// Clear every flag, distance and back-pointer.
    pub fn reset(&mut self) {
        self.visited.iter_mut().for_each(|v| *v = false);
        self.distance.iter_mut().for_each(|d| *d = f64::INFINITY);
        self.path.iter_mut().for_each(|p| *p = None);
        self.selected.iter_mut().for_each(|s| *s = false);
    }

    pub fn is_visited(&self, vertex: VertexIndex) -> bool {
        self.visited[vertex]
    }

    pub fn set_visited(&mut self, vertex: VertexIndex, visited: bool) {
        self.visited[vertex] = visited;
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    pub fn distance(&self, vertex: VertexIndex) -> f64 {
        self.distance[vertex]
    }

    pub fn set_distance(&mut self, vertex: VertexIndex, distance: f64) {
        self.distance[vertex] = distance;
    }

    /// Edge through which `vertex` reached its current distance.
    pub fn path(&self, vertex: VertexIndex) -> Option<EdgeIndex> {
        self.path[vertex]
    }

    pub fn set_path(&mut self, vertex: VertexIndex, edge: Option<EdgeIndex>) {
        self.path[vertex] = edge;
    }

    pub fn is_selected(&self, edge: EdgeIndex) -> bool {
        self.selected[edge]
    }

    pub fn set_selected(&mut self, edge: EdgeIndex, selected: bool) {
        self.selected[edge] = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn reset_restores_initial_values() {
        let mut graph = Graph::new();
        graph.add_node(Node::new(0));
        graph.add_node(Node::new(1));
        graph.add_edge(0, 1, 1.0).unwrap();

        let mut state = SearchState::for_graph(&graph);
        state.set_visited(1, true);
        state.set_distance(1, 4.0);
        state.set_path(1, Some(0));
        state.set_selected(1, true);
        assert_eq!(state.visited_count(), 1);

        state.reset();
        assert!(!state.is_visited(1));
        assert!(state.distance(1).is_infinite());
        assert_eq!(state.path(1), None);
        assert!(!state.is_selected(1));
    }
}
