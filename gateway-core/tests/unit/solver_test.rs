use super::*;
use crate::models::EdgeWeightKind;

struct NamedOnly;

impl SolverEntry for NamedOnly {
    fn call_named(&self, args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Ok((0..args.matrix.len()).collect())
    }
}

fn minimal_args<'a>(matrix: &'a [Vec<f64>], demands: &'a [i64]) -> SolverArgs<'a> {
    SolverArgs {
        points: None,
        matrix,
        demands,
        capacity: None,
        route_limit: None,
        service_times: None,
        weight_kind: EdgeWeightKind::Euc2D,
        single_route: false,
        minimize_routes: false,
        extras: HashMap::default(),
    }
}

#[test]
fn can_reject_positional_convention_by_default() {
    let matrix = vec![vec![0., 1.], vec![1., 0.]];
    let demands = vec![0, 1];
    let args = minimal_args(&matrix, &demands);

    let result = NamedOnly.call_positional((
        args.points,
        args.matrix,
        args.demands,
        args.capacity,
        args.route_limit,
        args.service_times,
        args.weight_kind,
        args.single_route,
        args.minimize_routes,
    ));

    assert!(matches!(result, Err(CallError::SignatureMismatch(_))));
}

#[test]
fn can_declare_no_params_by_default() {
    assert!(NamedOnly.accepted_params().is_empty());
}
