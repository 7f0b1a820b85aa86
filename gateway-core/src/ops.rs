#[cfg(test)]
#[path = "../tests/unit/ops_test.rs"]
mod ops_test;

use crate::models::{Coordinate, EdgeWeightKind, SolutionEncoding};
use serde::Serialize;

/// A feasibility verdict together with the violations which produced it.
#[derive(Clone, Debug, Serialize)]
pub struct Feasibility {
    /// Whether the solution respects all known constraints.
    pub feasible: bool,
    /// Human readable descriptions of every violated constraint.
    pub violations: Vec<String>,
}

/// Rebuilds an encoding into its canonical form: a single depot marker at both
/// ends, no consecutive markers and no empty routes. An encoding without
/// customers collapses to a single marker.
pub fn normalize(encoding: &[usize]) -> SolutionEncoding {
    let mut normalized = vec![0];

    let mut route_open = false;
    for &node in encoding {
        if node == 0 {
            if route_open {
                normalized.push(0);
                route_open = false;
            }
        } else {
            normalized.push(node);
            route_open = true;
        }
    }

    if route_open {
        normalized.push(0);
    }

    normalized
}

/// Sums arc weights along the encoding.
pub fn recompute_objective(encoding: &[usize], matrix: &[Vec<f64>]) -> f64 {
    encoding.windows(2).map(|arc| matrix[arc[0]][arc[1]]).sum()
}

/// Splits a normalized encoding into its routes, dropping depot markers.
pub fn split_routes(encoding: &[usize]) -> Vec<Vec<usize>> {
    encoding.split(|&node| node == 0).filter(|route| !route.is_empty()).map(<[usize]>::to_vec).collect()
}

/// Checks every route of the encoding against the capacity and, when present,
/// the route length limit including service times.
pub fn validate_feasibility(
    encoding: &[usize],
    matrix: &[Vec<f64>],
    demands: &[i64],
    capacity: Option<i64>,
    route_limit: Option<f64>,
    service_times: Option<&[f64]>,
) -> Feasibility {
    let mut violations = Vec::default();

    for (idx, route) in split_routes(encoding).iter().enumerate() {
        if let Some(capacity) = capacity {
            let demand: i64 = route.iter().map(|&node| demands[node]).sum();
            if demand > capacity {
                violations.push(format!("route {} has demand {demand} which exceeds capacity {capacity}", idx + 1));
            }
        }

        if let Some(limit) = route_limit {
            let mut length: f64 = 0.;
            let mut prev = 0;
            for &node in route {
                length += matrix[prev][node];
                if let Some(service_times) = service_times {
                    length += service_times[node];
                }
                prev = node;
            }
            length += matrix[prev][0];

            if length > limit {
                violations.push(format!("route {} has length {length:.2} which exceeds limit {limit:.2}", idx + 1));
            }
        }
    }

    Feasibility { feasible: violations.is_empty(), violations }
}

/// Synthesizes placeholder coordinates for a demand only problem: the depot
/// sits in the middle, customers are spread over a ring around it. The layout
/// is deterministic so repeated requests render identically.
pub fn synthesize_coordinates(demands: &[i64]) -> (Vec<Coordinate>, EdgeWeightKind) {
    let customers = demands.len().saturating_sub(1).max(1);

    let coordinates = (0..demands.len())
        .map(|node| {
            if node == 0 {
                (0.5, 0.5)
            } else {
                let angle = 2. * std::f64::consts::PI * ((node - 1) as f64) / (customers as f64);
                (0.5 + 0.4 * angle.cos(), 0.5 + 0.4 * angle.sin())
            }
        })
        .collect();

    (coordinates, EdgeWeightKind::Euc2D)
}
