#[cfg(test)]
#[path = "../tests/unit/catalog_test.rs"]
mod catalog_test;

use crate::registry::AlgorithmEntry;
use gateway_core::models::SolutionEncoding;
use gateway_core::solver::{CallError, PositionalArgs, SolverArgs, SolverEntry};
use std::sync::Arc;

/// Returns the default algorithm entries. The real solver library is a
/// swappable external collaborator, these entries are deliberately naive
/// placeholders which keep the service usable end to end and exercise both
/// calling conventions.
pub fn default_catalog() -> Vec<AlgorithmEntry> {
    vec![
        AlgorithmEntry {
            id: "sequential".to_string(),
            name: "Sequential".to_string(),
            description: "Fills routes with customers in index order until the capacity is reached".to_string(),
            entry: Arc::new(Sequential),
        },
        AlgorithmEntry {
            id: "sweep".to_string(),
            name: "Sweep".to_string(),
            description: "Fills routes with customers ordered by their polar angle around the depot".to_string(),
            entry: Arc::new(Sweep),
        },
        AlgorithmEntry {
            id: "nearest_neighbour".to_string(),
            name: "Nearest Neighbour".to_string(),
            description: "Repeatedly visits the closest customer which still fits into the vehicle".to_string(),
            entry: Arc::new(NearestNeighbour),
        },
    ]
}

/// Chunks customers into routes respecting the capacity, keeping the given
/// visit order.
fn fill_routes(order: &[usize], demands: &[i64], capacity: Option<i64>, single_route: bool) -> SolutionEncoding {
    let mut encoding = vec![0];

    let mut load = 0;
    for &customer in order {
        let demand = demands[customer];
        let exceeds = capacity.is_some_and(|capacity| load + demand > capacity);
        if exceeds && !single_route && encoding.len() > 1 && encoding[encoding.len() - 1] != 0 {
            encoding.push(0);
            load = 0;
        }
        encoding.push(customer);
        load += demand;
    }

    encoding.push(0);

    encoding
}

struct Sequential;

impl SolverEntry for Sequential {
    fn call_named(&self, args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        let order = (1..args.matrix.len()).collect::<Vec<_>>();

        Ok(fill_routes(&order, args.demands, args.capacity, args.single_route))
    }
}

struct Sweep;

impl SolverEntry for Sweep {
    fn accepted_params(&self) -> &[&str] {
        &["reverse"]
    }

    fn call_named(&self, args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        let points = args.points.ok_or_else(|| CallError::Runtime("sweep requires coordinates".to_string()))?;

        let depot = points[0];
        let mut order = (1..points.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| {
            let angle = |node: usize| (points[node].1 - depot.1).atan2(points[node].0 - depot.0);
            angle(a).total_cmp(&angle(b))
        });

        if args.extras.get("reverse").and_then(|value| value.as_bool()).unwrap_or(false) {
            order.reverse();
        }

        Ok(fill_routes(&order, args.demands, args.capacity, args.single_route))
    }
}

struct NearestNeighbour;

impl SolverEntry for NearestNeighbour {
    fn call_named(&self, _args: &SolverArgs<'_>) -> Result<SolutionEncoding, CallError> {
        Err(CallError::SignatureMismatch("nearest neighbour entry takes positional arguments only".to_string()))
    }

    fn call_positional(&self, args: PositionalArgs<'_>) -> Result<SolutionEncoding, CallError> {
        let (_, matrix, demands, capacity, _, _, _, single_route, _) = args;

        let mut encoding = vec![0];
        let mut visited = vec![false; matrix.len()];
        visited[0] = true;

        let mut position = 0;
        let mut load = 0;
        while let Some(next) = (1..matrix.len())
            .filter(|&node| !visited[node])
            .filter(|&node| single_route || capacity.is_none_or(|capacity| load + demands[node] <= capacity))
            .min_by(|&a, &b| matrix[position][a].total_cmp(&matrix[position][b]))
        {
            encoding.push(next);
            visited[next] = true;
            load += demands[next];
            position = next;

            let exhausted = (1..matrix.len()).all(|node| visited[node]);
            let fits_more = single_route
                || (1..matrix.len())
                    .any(|node| !visited[node] && capacity.is_none_or(|capacity| load + demands[node] <= capacity));
            if !exhausted && !fits_more {
                encoding.push(0);
                position = 0;
                load = 0;
            }
        }

        encoding.push(0);

        if (1..matrix.len()).any(|node| !visited[node]) {
            return Err(CallError::Runtime("cannot assign every customer to a route".to_string()));
        }

        Ok(encoding)
    }
}
