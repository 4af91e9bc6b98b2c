use std::fmt::Write;

use serde::Serialize;

use crate::node::NodeId;
use crate::solver::{Tour, TourAlgorithm};

/// Stop within a tour.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourStop {
    pub index: usize,
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TourStop {
    /// Label followed by the id in parentheses, or just the id.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => format!("{label} ({})", self.id),
            _ => self.id.to_string(),
        }
    }
}

/// Structured representation of a tour that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TourSummary {
    pub algorithm: TourAlgorithm,
    pub start: NodeId,
    pub cost: f64,
    pub legs: usize,
    /// Legs priced by great-circle distance because no edge existed.
    pub estimated_legs: usize,
    pub elapsed_ms: f64,
    pub stops: Vec<TourStop>,
}

impl TourSummary {
    pub fn from_tour(tour: &Tour) -> Self {
        let stops = tour
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| TourStop {
                index,
                id: node.id(),
                label: node.label().map(str::to_string),
            })
            .collect::<Vec<_>>();

        Self {
            algorithm: tour.algorithm,
            start: stops.first().map_or(0, |stop| stop.id),
            cost: tour.cost,
            legs: tour.leg_count(),
            estimated_legs: tour.estimated_legs,
            elapsed_ms: tour.elapsed.as_secs_f64() * 1000.0,
            stops,
        }
    }

    /// One line per algorithm for side-by-side comparisons. Short tours
    /// also list their stops.
    pub fn render_compact(&self) -> String {
        let path = self
            .stops
            .iter()
            .map(|stop| stop.id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let mut buffer = format!(
            "{:<20} cost {:>14.2}  {:>10.3} ms",
            self.algorithm.to_string(),
            self.cost,
            self.elapsed_ms
        );
        if self.estimated_legs > 0 {
            let _ = write!(buffer, "  ({} estimated)", self.estimated_legs);
        }
        if self.stops.len() <= 12 {
            let _ = write!(buffer, "  {path}");
        }
        buffer
    }
}
