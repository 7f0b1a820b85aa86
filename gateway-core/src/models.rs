#[cfg(test)]
#[path = "../tests/unit/models_test.rs"]
mod models_test;

use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};

/// A node coordinate pair.
pub type Coordinate = (f64, f64);

/// An ordered sequence of node indices where value 0 marks a depot visit and,
/// therefore, a route boundary.
pub type SolutionEncoding = Vec<usize>;

/// Distance semantics of the edge weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeightKind {
    /// Two dimensional euclidean distance.
    #[serde(rename = "EUC_2D")]
    Euc2D,
    /// Manhattan distance.
    #[serde(rename = "MAN_2D")]
    Man2D,
    /// Maximum of coordinate deltas.
    #[serde(rename = "MAX_2D")]
    Max2D,
    /// Euclidean distance rounded up.
    #[serde(rename = "CEIL_2D")]
    Ceil2D,
    /// Weights are listed explicitly in the source document.
    #[serde(rename = "EXPLICIT")]
    Explicit,
}

impl EdgeWeightKind {
    /// Returns the canonical tag of the kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Euc2D => "EUC_2D",
            Self::Man2D => "MAN_2D",
            Self::Max2D => "MAX_2D",
            Self::Ceil2D => "CEIL_2D",
            Self::Explicit => "EXPLICIT",
        }
    }

    /// Computes the weight between two coordinates for metric kinds.
    /// Returns `None` for [`EdgeWeightKind::Explicit`] which carries no metric.
    pub fn metric_weight(&self, a: Coordinate, b: Coordinate) -> Option<f64> {
        let (dx, dy) = ((a.0 - b.0).abs(), (a.1 - b.1).abs());
        match self {
            Self::Euc2D => Some((dx * dx + dy * dy).sqrt()),
            Self::Man2D => Some(dx + dy),
            Self::Max2D => Some(dx.max(dy)),
            Self::Ceil2D => Some((dx * dx + dy * dy).sqrt().ceil()),
            Self::Explicit => None,
        }
    }

    /// Whether matrices of this kind are expected to be symmetric.
    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Self::Explicit)
    }
}

impl std::str::FromStr for EdgeWeightKind {
    type Err = GatewayError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "EUC_2D" => Ok(Self::Euc2D),
            "MAN_2D" => Ok(Self::Man2D),
            "MAX_2D" => Ok(Self::Max2D),
            "CEIL_2D" => Ok(Self::Ceil2D),
            "EXPLICIT" => Ok(Self::Explicit),
            _ => Err(GatewayError::Input(format!("unknown edge weight type: '{tag}'"))),
        }
    }
}

impl std::fmt::Display for EdgeWeightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The canonical problem representation every request is reduced to before it
/// reaches a solver entry point.
#[derive(Clone, Debug)]
pub struct Problem {
    /// Amount of nodes including the depot.
    pub dimension: usize,
    /// Node coordinates, present only when the source carried (or the gateway
    /// synthesized) explicit spatial data.
    pub coordinates: Option<Vec<Coordinate>>,
    /// Customer demands, one entry per node with `demands[0] == 0` for the depot.
    pub demands: Vec<i64>,
    /// A full square distance matrix.
    pub matrix: Vec<Vec<f64>>,
    /// Vehicle capacity, `None` means unbounded.
    pub capacity: Option<i64>,
    /// Distance semantics of the matrix.
    pub weight_kind: EdgeWeightKind,
}

impl Problem {
    /// Creates a problem checking the dimension invariants.
    pub fn new(
        coordinates: Option<Vec<Coordinate>>,
        demands: Vec<i64>,
        matrix: Vec<Vec<f64>>,
        capacity: Option<i64>,
        weight_kind: EdgeWeightKind,
    ) -> GatewayResult<Self> {
        let dimension = matrix.len();

        if let Some(row) = matrix.iter().find(|row| row.len() != dimension) {
            return Err(GatewayError::Internal(format!(
                "distance matrix is not square: got row of length {} for dimension {dimension}",
                row.len()
            )));
        }

        if demands.len() != dimension {
            return Err(GatewayError::Internal(format!(
                "demands length {} does not match dimension {dimension}",
                demands.len()
            )));
        }

        if let Some(coordinates) = coordinates.as_ref() {
            if coordinates.len() != dimension {
                return Err(GatewayError::Internal(format!(
                    "coordinates length {} does not match dimension {dimension}",
                    coordinates.len()
                )));
            }
        }

        if weight_kind.is_symmetric() {
            for (i, row) in matrix.iter().enumerate() {
                if row[i] != 0. {
                    return Err(GatewayError::Internal(format!(
                        "matrix of kind '{weight_kind}' must have a zero diagonal, got {} at node {i}",
                        row[i]
                    )));
                }
                if let Some(j) = (0..i).find(|&j| row[j] != matrix[j][i]) {
                    return Err(GatewayError::Internal(format!(
                        "matrix of kind '{weight_kind}' must be symmetric, differs at ({i}, {j})"
                    )));
                }
            }
        }

        Ok(Self { dimension, coordinates, demands, matrix, capacity, weight_kind })
    }
}

/// Auxiliary constraints read from a second pass over the source document.
#[derive(Clone, Debug, Default)]
pub struct AdditionalConstraints {
    /// An upper bound on the amount of vehicles, when the source declares one.
    pub vehicles: Option<usize>,
    /// A limit on the length of a single route.
    pub route_limit: Option<f64>,
    /// Per node service times, depot entry is zero.
    pub service_times: Option<Vec<f64>>,
}
