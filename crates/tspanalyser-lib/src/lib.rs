//! tspanalyser library entry points.
//!
//! This crate loads the CSV graph datasets into memory and runs Travelling
//! Salesman tour searches over them: an exact branch-and-bound, a spanning-tree
//! approximation, nearest neighbour and two recovery heuristics for graphs that
//! are not complete. Higher-level consumers (the CLI) should only depend on the
//! items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod engine;
pub mod error;
pub mod geo;
pub mod graph;
pub mod node;
pub mod output;
pub mod solver;
pub mod state;

pub use dataset::{
    available_datasets, default_data_dir, load_dataset, resolve_data_dir, DatasetFiles,
    DatasetKind, DatasetSelection, DATA_DIR_ENV,
};
pub use engine::{Dataset, TourEngine};
pub use error::{Error, Result};
pub use geo::{haversine_distance, GeoPosition};
pub use graph::{Edge, EdgeIndex, Graph, VertexIndex};
pub use node::{IdToNode, Node, NodeId};
pub use output::{TourStop, TourSummary};
pub use solver::{
    minimum_spanning_tree, select_solver, SolverConfig, SpanningTree, Tour, TourAlgorithm,
    TourPath, TourRequest, TourSolver, DEFAULT_START_ID,
};
pub use state::SearchState;
