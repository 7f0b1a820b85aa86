#[cfg(test)]
#[path = "../tests/unit/solver_test.rs"]
mod solver_test;

use crate::models::{Coordinate, EdgeWeightKind, SolutionEncoding};
use serde_json::Value;
use std::collections::HashMap;

/// The named argument bag assembled by the executor for the primary calling
/// convention. Entries pick the fields they understand; pass through options
/// land in [`SolverArgs::extras`] only when the entry declares their names.
#[derive(Debug)]
pub struct SolverArgs<'a> {
    /// Node coordinates, when the problem carries spatial data.
    pub points: Option<&'a [Coordinate]>,
    /// Full square distance matrix.
    pub matrix: &'a [Vec<f64>],
    /// Customer demands, depot entry included.
    pub demands: &'a [i64],
    /// Vehicle capacity, `None` means unbounded.
    pub capacity: Option<i64>,
    /// A limit on the length of a single route.
    pub route_limit: Option<f64>,
    /// Per node service times.
    pub service_times: Option<&'a [f64]>,
    /// Distance semantics of the matrix.
    pub weight_kind: EdgeWeightKind,
    /// Whether the result must be a single route.
    pub single_route: bool,
    /// Whether the entry should prefer fewer routes over shorter ones.
    pub minimize_routes: bool,
    /// Caller supplied options filtered to the names the entry declares.
    pub extras: HashMap<String, Value>,
}

/// The fallback calling convention: a fixed tuple of
/// (points, distances, demands, capacity, route length limit, service times,
/// weight kind, single route flag, minimize route count flag) - in that order.
pub type PositionalArgs<'a> = (
    Option<&'a [Coordinate]>,
    &'a [Vec<f64>],
    &'a [i64],
    Option<i64>,
    Option<f64>,
    Option<&'a [f64]>,
    EdgeWeightKind,
    bool,
    bool,
);

/// Failures raised by an entry point invocation. The executor branches on the
/// variant: a signature mismatch triggers the positional retry, everything
/// else is final.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallError {
    /// The entry point does not accept arguments in this shape.
    SignatureMismatch(String),
    /// The backing implementation of the entry point cannot be loaded.
    Unavailable(String),
    /// The solver body failed while running.
    Runtime(String),
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignatureMismatch(msg) => write!(f, "signature mismatch: {msg}"),
            Self::Unavailable(msg) => write!(f, "entry point unavailable: {msg}"),
            Self::Runtime(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CallError {}

/// An external routing algorithm registered under a stable identifier.
///
/// Entry points form an open, heterogeneous plugin set with call shapes the
/// gateway cannot control, so the contract is explicit about both supported
/// conventions instead of relying on runtime introspection: the executor calls
/// [`SolverEntry::call_named`] first and retries exactly once via
/// [`SolverEntry::call_positional`] when the named shape is rejected.
pub trait SolverEntry: Send + Sync {
    /// Names of the pass through options this entry accepts.
    fn accepted_params(&self) -> &[&str] {
        &[]
    }

    /// Invokes the entry under the named argument convention.
    fn call_named(&self, args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError>;

    /// Invokes the entry under the fixed positional convention.
    fn call_positional(&self, args: PositionalArgs<'_>) -> Result<SolutionEncoding, CallError> {
        let _ = args;
        Err(CallError::SignatureMismatch("positional convention is not supported".to_string()))
    }
}
