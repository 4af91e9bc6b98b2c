//! Shared fixture helpers for integration tests.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tspanalyser_lib::{
    load_dataset, Dataset, DatasetSelection, Graph, Node, NodeId, SolverConfig, Tour, TourEngine,
};

/// Path to the CSV fixtures shared by the library and CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn engine_for(selection: &DatasetSelection) -> TourEngine {
    let dataset = load_dataset(&fixtures_dir(), selection).expect("fixture loads");
    TourEngine::with_dataset(dataset, SolverConfig::default())
}

/// Four nodes with edges 10, 15, 20, 25, 30, 35; the optimal tour costs 80.
#[allow(dead_code)]
pub fn square_with_diagonals() -> Dataset {
    let mut graph = Graph::new();
    for id in 0..4 {
        graph.add_node(Node::new(id));
    }
    for (from, to, weight) in [
        (0, 1, 10.0),
        (0, 2, 15.0),
        (0, 3, 20.0),
        (1, 2, 35.0),
        (1, 3, 25.0),
        (2, 3, 30.0),
    ] {
        graph.add_edge(from, to, weight).expect("nodes exist");
    }
    Dataset::from_graph(graph)
}

/// Complete graph over `n` nodes with weights derived from the node ids.
#[allow(dead_code)]
pub fn complete_graph(n: NodeId) -> Dataset {
    let mut graph = Graph::new();
    for id in 0..n {
        graph.add_node(Node::new(id));
    }
    for a in 0..n {
        for b in (a + 1)..n {
            let weight = ((a * 7 + b * 13) % 17 + 1) as f64;
            graph.add_edge(a, b, weight).expect("nodes exist");
        }
    }
    Dataset::from_graph(graph)
}

/// Assert that `tour` visits every node of `graph` exactly once and closes
/// on `start`.
#[allow(dead_code)]
pub fn assert_valid_tour(graph: &Graph, tour: &Tour, start: NodeId) {
    let ids = tour.ids();
    assert_eq!(ids.len(), graph.node_count() + 1, "tour length for {ids:?}");
    assert_eq!(ids.first(), Some(&start));
    assert_eq!(ids.last(), Some(&start));

    let visited: BTreeSet<NodeId> = ids[..ids.len() - 1].iter().copied().collect();
    let expected: BTreeSet<NodeId> = graph.nodes().iter().map(Node::id).collect();
    assert_eq!(visited, expected, "tour {ids:?} is not a permutation");
}
