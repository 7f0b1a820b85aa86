use crate::executor::{SolveOptions, SolveOutcome};
use gateway_core::models::{AdditionalConstraints, Coordinate, Problem};
use gateway_core::ops::{self, Feasibility};
use serde::Serialize;

/// The transport-safe success payload: plain nested sequences only, nothing
/// library specific crosses the boundary.
#[derive(Debug, Serialize)]
pub struct ResponsePayload {
    /// Recomputed objective, coerced to an exact integer.
    pub objective: i64,
    /// Amount of routes in the normalized solution.
    pub num_routes: usize,
    /// Wall clock duration of the solver invocation in seconds.
    pub elapsed_time: f64,
    /// Feasibility verdict with violation details.
    pub feasibility: Feasibility,
    /// Customer visits per route, depot markers stripped.
    pub routes: Vec<Vec<usize>>,
    /// Node coordinates for client side rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Coordinate>>,
    /// The full distance matrix of the problem.
    pub distance_matrix: Vec<Vec<f64>>,
    /// Customer demands, depot entry included.
    pub customer_demands: Vec<i64>,
    /// Vehicle capacity when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

/// Runs the post-processing collaborators over the raw encoding and packages
/// their results: normalization, objective recomputation, feasibility
/// validation and route decomposition.
pub fn assemble(
    problem: &Problem,
    constraints: &AdditionalConstraints,
    options: &SolveOptions,
    outcome: &SolveOutcome,
) -> ResponsePayload {
    let capacity = options.effective_capacity(problem);
    let route_limit = options.effective_route_limit(constraints);

    let solution = ops::normalize(&outcome.encoding);
    let objective = ops::recompute_objective(&solution, &problem.matrix);
    let num_routes = solution.iter().filter(|&&node| node == 0).count() - 1;
    let feasibility = ops::validate_feasibility(
        &solution,
        &problem.matrix,
        &problem.demands,
        capacity,
        route_limit,
        constraints.service_times.as_deref(),
    );
    let routes = ops::split_routes(&solution);

    ResponsePayload {
        objective: objective.round() as i64,
        num_routes,
        elapsed_time: outcome.elapsed_time,
        feasibility,
        routes,
        points: problem.coordinates.clone(),
        distance_matrix: problem.matrix.clone(),
        customer_demands: problem.demands.clone(),
        capacity,
    }
}
