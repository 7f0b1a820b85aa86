use crate::registry::AlgorithmEntry;
use gateway_core::models::{EdgeWeightKind, Problem, SolutionEncoding};
use gateway_core::solver::{CallError, PositionalArgs, SolverArgs, SolverEntry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Creates the canonical three node test problem: a depot at the origin and
/// two unit distance customers.
pub fn create_test_problem() -> Problem {
    let sqrt2 = std::f64::consts::SQRT_2;
    let coordinates = vec![(0., 0.), (1., 0.), (0., 1.)];
    let matrix = vec![vec![0., 1., 1.], vec![1., 0., sqrt2], vec![1., sqrt2, 0.]];

    Problem::new(Some(coordinates), vec![0, 1, 1], matrix, Some(2), EdgeWeightKind::Euc2D)
        .expect("cannot create test problem")
}

pub fn create_entry(id: &str, solver: Arc<dyn SolverEntry>) -> AlgorithmEntry {
    AlgorithmEntry {
        id: id.to_string(),
        name: id.to_string(),
        description: format!("test entry '{id}'"),
        entry: solver,
    }
}

/// Accepts the named convention and returns a fixed encoding, counting its
/// invocations.
pub struct FixedEntry {
    encoding: SolutionEncoding,
    calls: AtomicUsize,
}

impl FixedEntry {
    pub fn new(encoding: SolutionEncoding) -> Self {
        Self { encoding, calls: AtomicUsize::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SolverEntry for FixedEntry {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.encoding.clone())
    }
}

/// Rejects the named convention and succeeds under the positional one.
pub struct PositionalOnlyEntry {
    pub encoding: SolutionEncoding,
}

impl SolverEntry for PositionalOnlyEntry {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Err(CallError::SignatureMismatch("takes positional arguments only".to_string()))
    }

    fn call_positional(&self, _args: PositionalArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Ok(self.encoding.clone())
    }
}

/// Rejects both calling conventions.
pub struct RejectingEntry;

impl SolverEntry for RejectingEntry {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Err(CallError::SignatureMismatch("takes positional arguments only".to_string()))
    }
}

/// Fails with a runtime error carrying the given message.
pub struct FailingEntry {
    pub message: String,
}

impl SolverEntry for FailingEntry {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Err(CallError::Runtime(self.message.clone()))
    }
}

/// Simulates an entry whose backing implementation cannot be loaded.
pub struct UnavailableEntry;

impl SolverEntry for UnavailableEntry {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Err(CallError::Unavailable("no module named 'stub'".to_string()))
    }
}

/// Declares a single pass through option and records the option names it
/// actually receives.
pub struct RecordingEntry {
    pub received: Mutex<Vec<String>>,
}

impl RecordingEntry {
    pub fn new() -> Self {
        Self { received: Mutex::new(Vec::default()) }
    }
}

impl SolverEntry for RecordingEntry {
    fn accepted_params(&self) -> &[&str] {
        &["alpha"]
    }

    fn call_named(&self, args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        let mut names = args.extras.keys().cloned().collect::<Vec<_>>();
        names.sort();
        *self.received.lock().expect("poisoned lock") = names;

        Ok(vec![0, 1, 2, 0])
    }
}
