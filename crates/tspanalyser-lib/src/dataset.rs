//! CSV dataset loading.
//!
//! A data directory holds three families of graphs:
//!
//! - `Toy-Graphs/<name>.csv`: one file of `origin,destination,distance` rows,
//!   optionally followed by origin and destination labels.
//! - `Extra_Fully_Connected_Graphs/`: a shared `nodes.csv` of
//!   `id,longitude,latitude` and one headerless `edges_<N>.csv` per size. Only
//!   the first `N` nodes are read.
//! - `Real-World Graphs/graph<K>/`: `nodes.csv` and `edges.csv`, both with a
//!   header row.
//!
//! Every edge is stored in both directions. A load either yields a complete
//! [`Dataset`] or an error; partially read graphs are never returned.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use directories::ProjectDirs;
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::Dataset;
use crate::error::{Error, Result};
use crate::geo::GeoPosition;
use crate::graph::Graph;
use crate::node::{IdToNode, Node, NodeId};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "TSPANALYSER_DATA_DIR";

pub const TOY_GRAPHS: [&str; 3] = ["shipping", "stadiums", "tourism"];

pub const MEDIUM_SIZES: [usize; 12] = [25, 50, 75, 100, 200, 300, 400, 500, 600, 700, 800, 900];

pub const REAL_WORLD_GRAPHS: [u8; 3] = [1, 2, 3];

/// Upper bound on node rows read from a node file.
pub const NODE_LIMIT: usize = 10_000;

const TOY_DIR: &str = "Toy-Graphs";
const MEDIUM_DIR: &str = "Extra_Fully_Connected_Graphs";
const REAL_WORLD_DIR: &str = "Real-World Graphs";

/// Family of graphs a selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Toy,
    Medium,
    RealWorld,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Toy,
        DatasetKind::Medium,
        DatasetKind::RealWorld,
    ];

    /// Graph names accepted for this family.
    pub fn graph_names(self) -> Vec<String> {
        match self {
            DatasetKind::Toy => TOY_GRAPHS.iter().map(|name| name.to_string()).collect(),
            DatasetKind::Medium => MEDIUM_SIZES.iter().map(usize::to_string).collect(),
            DatasetKind::RealWorld => REAL_WORLD_GRAPHS
                .iter()
                .map(|k| format!("graph{k}"))
                .collect(),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DatasetKind::Toy => "toy",
            DatasetKind::Medium => "medium",
            DatasetKind::RealWorld => "real-world",
        };
        f.write_str(value)
    }
}

impl FromStr for DatasetKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| Error::UnknownGraph {
                kind: "dataset".to_string(),
                name: value.to_string(),
                choices: DatasetKind::ALL.iter().map(ToString::to_string).collect(),
            })
    }
}

/// One graph within a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetSelection {
    pub kind: DatasetKind,
    pub graph: String,
}

impl DatasetSelection {
    pub fn new(kind: DatasetKind, graph: impl Into<String>) -> Self {
        Self {
            kind,
            graph: graph.into(),
        }
    }

    pub fn toy(name: impl Into<String>) -> Self {
        Self::new(DatasetKind::Toy, name)
    }

    pub fn medium(size: usize) -> Self {
        Self::new(DatasetKind::Medium, size.to_string())
    }

    pub fn real_world(index: u8) -> Self {
        Self::new(DatasetKind::RealWorld, format!("graph{index}"))
    }

    /// Resolve the files backing this selection beneath `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGraph`] when the graph name is not part of the
    /// family.
    pub fn files(&self, data_dir: &Path) -> Result<DatasetFiles> {
        let choices = self.kind.graph_names();
        let graph = self.graph.trim();
        if !choices.iter().any(|choice| choice.eq_ignore_ascii_case(graph)) {
            return Err(Error::UnknownGraph {
                kind: self.kind.to_string(),
                name: self.graph.clone(),
                choices,
            });
        }
        let graph = graph.to_ascii_lowercase();

        let files = match self.kind {
            DatasetKind::Toy => DatasetFiles {
                nodes: None,
                edges: data_dir.join(TOY_DIR).join(format!("{graph}.csv")),
                node_limit: NODE_LIMIT,
                edges_have_header: true,
            },
            DatasetKind::Medium => {
                let size = graph.parse::<usize>().unwrap_or(NODE_LIMIT);
                let dir = data_dir.join(MEDIUM_DIR);
                DatasetFiles {
                    nodes: Some(dir.join("nodes.csv")),
                    edges: dir.join(format!("edges_{graph}.csv")),
                    node_limit: size,
                    edges_have_header: false,
                }
            }
            DatasetKind::RealWorld => {
                let dir = data_dir.join(REAL_WORLD_DIR).join(&graph);
                DatasetFiles {
                    nodes: Some(dir.join("nodes.csv")),
                    edges: dir.join("edges.csv"),
                    node_limit: NODE_LIMIT,
                    edges_have_header: true,
                }
            }
        };
        Ok(files)
    }
}

impl fmt::Display for DatasetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.graph)
    }
}

/// Paths and read rules for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    /// Node file; toy graphs derive their nodes from the edge rows.
    pub nodes: Option<PathBuf>,
    pub edges: PathBuf,
    pub node_limit: usize,
    pub edges_have_header: bool,
}

impl DatasetFiles {
    fn exist(&self) -> bool {
        self.edges.is_file() && self.nodes.iter().all(|path| path.is_file())
    }
}

/// Resolve the directory datasets are read from.
///
/// Precedence: explicit `override_dir`, then the `TSPANALYSER_DATA_DIR`
/// environment variable, then the platform data directory.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(env_dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(env_dir));
    }
    default_data_dir()
}

/// Platform data directory for tspanalyser.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "tspanalyser", "tspanalyser")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Every selection whose files are present beneath `data_dir`.
pub fn available_datasets(data_dir: &Path) -> Vec<DatasetSelection> {
    DatasetKind::ALL
        .into_iter()
        .flat_map(|kind| {
            kind.graph_names()
                .into_iter()
                .map(move |graph| DatasetSelection::new(kind, graph))
        })
        .filter(|selection| {
            selection
                .files(data_dir)
                .map(|files| files.exist())
                .unwrap_or(false)
        })
        .collect()
}

/// Load the graph named by `selection` from `data_dir`.
///
/// # Errors
///
/// Returns [`Error::UnknownGraph`] for names outside the family,
/// [`Error::DatasetNotFound`] when a backing file is missing and
/// [`Error::MalformedDataset`] when a row cannot be interpreted or an edge
/// references a node that was not loaded.
pub fn load_dataset(data_dir: &Path, selection: &DatasetSelection) -> Result<Dataset> {
    let files = selection.files(data_dir)?;
    for path in files.nodes.iter().chain(std::iter::once(&files.edges)) {
        if !path.is_file() {
            return Err(Error::DatasetNotFound { path: path.clone() });
        }
    }

    let mut graph = Graph::new();
    let mut id_to_node = IdToNode::new();

    match &files.nodes {
        None => read_labelled_edges(&files.edges, &mut graph, &mut id_to_node)?,
        Some(nodes) => {
            read_nodes(nodes, files.node_limit, &mut graph, &mut id_to_node)?;
            read_edges(&files.edges, files.edges_have_header, &mut graph)?;
        }
    }

    info!(
        dataset = %selection,
        nodes = graph.node_count(),
        edges = graph.edge_count() / 2,
        "dataset loaded"
    );
    Ok(Dataset::new(graph, id_to_node))
}

/// Toy graphs: nodes come from the edge rows, with labels when the header
/// has at least five columns.
fn read_labelled_edges(
    path: &Path,
    graph: &mut Graph,
    id_to_node: &mut IdToNode,
) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Fields)
        .flexible(true)
        .from_path(path)?;
    let labelled = reader.headers()?.len() >= 5;
    debug!(path = %path.display(), labelled, "reading toy graph");

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let origin: NodeId = parse_field(&record, 0, "origin", path, line)?;
        let destination: NodeId = parse_field(&record, 1, "destination", path, line)?;
        let distance: f64 = parse_field(&record, 2, "distance", path, line)?;

        for (id, label_column) in [(origin, 3), (destination, 4)] {
            let node = match record.get(label_column).filter(|_| labelled) {
                Some(label) => Node::labelled(id, label),
                None => Node::new(id),
            };
            id_to_node.entry(id).or_insert_with(|| node.clone());
            graph.add_node(node);
        }

        graph
            .add_edge(origin, destination, distance)
            .map_err(|err| malformed(path, line, err.to_string()))?;
    }
    Ok(())
}

fn read_nodes(
    path: &Path,
    limit: usize,
    graph: &mut Graph,
    id_to_node: &mut IdToNode,
) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Fields)
        .flexible(true)
        .from_path(path)?;

    for result in reader.records().take(limit) {
        let record = result?;
        let line = line_of(&record);
        let id: NodeId = parse_field(&record, 0, "id", path, line)?;
        let longitude: f64 = parse_field(&record, 1, "longitude", path, line)?;
        let latitude: f64 = parse_field(&record, 2, "latitude", path, line)?;

        let node = Node::positioned(id, GeoPosition::new(latitude, longitude));
        id_to_node.entry(id).or_insert_with(|| node.clone());
        graph.add_node(node);
    }
    Ok(())
}

fn read_edges(path: &Path, has_header: bool, graph: &mut Graph) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Fields)
        .flexible(true)
        .has_headers(has_header)
        .from_path(path)?;

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let origin: NodeId = parse_field(&record, 0, "origin", path, line)?;
        let destination: NodeId = parse_field(&record, 1, "destination", path, line)?;
        let distance: f64 = parse_field(&record, 2, "distance", path, line)?;
        graph
            .add_edge(origin, destination, distance)
            .map_err(|err| malformed(path, line, err.to_string()))?;
    }
    Ok(())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn parse_field<T>(
    record: &StringRecord,
    index: usize,
    name: &str,
    path: &Path,
    line: u64,
) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = record
        .get(index)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| malformed(path, line, format!("missing {name}")))?;
    raw.parse::<T>()
        .map_err(|err| malformed(path, line, format!("invalid {name} '{raw}': {err}")))
}

fn malformed(path: &Path, line: u64, message: String) -> Error {
    Error::MalformedDataset {
        path: path.to_path_buf(),
        line,
        message,
    }
}
