use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::geo::GeoPosition;

/// Numeric identifier for a node.
pub type NodeId = i64;

/// Lookup from node identifier to its node, populated alongside the graph.
pub type IdToNode = HashMap<NodeId, Node>;

/// Immutable graph vertex payload.
///
/// Equality and hashing cover the whole tuple (id, label, latitude,
/// longitude); ids are unique within a dataset so the id is the effective key.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    position: GeoPosition,
}

impl Node {
    /// Node without a label, located at (0, 0).
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            label: None,
            position: GeoPosition::default(),
        }
    }

    pub fn labelled(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: Some(label.into()),
            position: GeoPosition::default(),
        }
    }

    pub fn positioned(id: NodeId, position: GeoPosition) -> Self {
        Self {
            id,
            label: None,
            position,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn position(&self) -> GeoPosition {
        self.position
    }

    /// Label when present, otherwise the numeric id.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => self.id.to_string(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.position.latitude.to_bits() == other.position.latitude.to_bits()
            && self.position.longitude.to_bits() == other.position.longitude.to_bits()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.label.hash(state);
        self.position.latitude.to_bits().hash(state);
        self.position.longitude.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_covers_every_field() {
        let plain = Node::new(1);
        assert_eq!(plain, Node::new(1));
        assert_ne!(plain, Node::labelled(1, "Porto"));
        assert_ne!(plain, Node::positioned(1, GeoPosition::new(1.0, 0.0)));
        assert_ne!(plain, Node::new(2));
    }

    #[test]
    fn hashing_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(Node::labelled(3, "Lisboa"));
        set.insert(Node::labelled(3, "Lisboa"));
        set.insert(Node::new(3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(Node::new(7).display_name(), "7");
        assert_eq!(Node::labelled(7, "").display_name(), "7");
        assert_eq!(Node::labelled(7, "Braga").display_name(), "Braga");
    }
}
