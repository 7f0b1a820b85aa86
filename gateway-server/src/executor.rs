#[cfg(test)]
#[path = "../tests/unit/executor_test.rs"]
mod executor_test;

use crate::registry::AlgorithmEntry;
use gateway_core::models::{AdditionalConstraints, Problem, SolutionEncoding};
use gateway_core::solver::{CallError, SolverArgs};
use gateway_core::{GatewayError, GatewayResult};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Request scoped knobs of a solve: overrides and flags the caller supplied
/// next to the problem itself.
#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    /// Overrides the capacity carried by the problem.
    pub capacity: Option<i64>,
    /// A limit on the length of a single route.
    pub route_limit: Option<f64>,
    /// Whether the result must be a single route.
    pub single_route: bool,
    /// Whether the entry should prefer fewer routes over shorter ones.
    pub minimize_routes: bool,
    /// Free form options, passed through only when the entry declares them.
    pub extras: HashMap<String, Value>,
}

impl SolveOptions {
    /// The capacity handed to the solver: the request override wins over the
    /// value carried by the problem.
    pub fn effective_capacity(&self, problem: &Problem) -> Option<i64> {
        self.capacity.or(problem.capacity)
    }

    /// The route length limit handed to the solver: the request override wins
    /// over the value read from the source document.
    pub fn effective_route_limit(&self, constraints: &AdditionalConstraints) -> Option<f64> {
        self.route_limit.or(constraints.route_limit)
    }
}

/// The result of one entry point invocation.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// The raw encoding returned by the entry point.
    pub encoding: SolutionEncoding,
    /// Wall clock duration of the invocation in seconds.
    pub elapsed_time: f64,
}

/// Invokes the entry point of a resolved algorithm.
///
/// The named convention is tried first; a signature mismatch triggers exactly
/// one retry under the fixed positional convention. The elapsed time covers
/// the invocation only, parameter assembly and post-processing are excluded.
pub fn execute(
    entry: &AlgorithmEntry,
    problem: &Problem,
    constraints: &AdditionalConstraints,
    options: &SolveOptions,
) -> GatewayResult<SolveOutcome> {
    let accepted = entry.entry.accepted_params();
    let extras = options
        .extras
        .iter()
        .filter(|(name, _)| accepted.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect::<HashMap<_, _>>();

    if extras.len() != options.extras.len() {
        debug!("dropping extra options not declared by entry point '{}'", entry.id);
    }

    let args = SolverArgs {
        points: problem.coordinates.as_deref(),
        matrix: &problem.matrix,
        demands: &problem.demands,
        capacity: options.effective_capacity(problem),
        route_limit: options.effective_route_limit(constraints),
        service_times: constraints.service_times.as_deref(),
        weight_kind: problem.weight_kind,
        single_route: options.single_route,
        minimize_routes: options.minimize_routes,
        extras,
    };

    let started = Instant::now();
    let result = match entry.entry.call_named(&args) {
        Err(CallError::SignatureMismatch(_)) => entry.entry.call_positional((
            args.points,
            args.matrix,
            args.demands,
            args.capacity,
            args.route_limit,
            args.service_times,
            args.weight_kind,
            args.single_route,
            args.minimize_routes,
        )),
        result => result,
    };
    let elapsed_time = started.elapsed().as_secs_f64();

    let encoding = result.map_err(|err| match err {
        CallError::SignatureMismatch(msg) => GatewayError::Interface(format!(
            "entry point '{}' accepts neither calling convention: {msg}",
            entry.id
        )),
        CallError::Unavailable(msg) => GatewayError::Unavailable(format!("cannot load entry point '{}': {msg}", entry.id)),
        CallError::Runtime(msg) => GatewayError::Solver(msg),
    })?;

    if let Some(&node) = encoding.iter().find(|&&node| node >= problem.dimension) {
        return Err(GatewayError::Solver(format!(
            "entry point '{}' returned node index {node} which is out of range",
            entry.id
        )));
    }

    Ok(SolveOutcome { encoding, elapsed_time })
}
