use super::*;
use crate::writer::{write_problem, ProblemDraft};
use std::io::BufWriter;

fn get_example_document() -> String {
    let mut draft = ProblemDraft::new(vec![(0., 0.), (3., 4.), (0., 1.)]);
    draft.demands = Some(vec![0, 1, 1]);
    draft.capacity = Some(30);

    let mut buffer = Vec::new();
    write_problem(BufWriter::new(&mut buffer), &draft).expect("cannot write draft");

    String::from_utf8(buffer).expect("invalid utf8")
}

fn get_explicit_document(format: &str, weights: &str) -> String {
    [
        "NAME : explicit",
        "TYPE : CVRP",
        "DIMENSION : 3",
        "EDGE_WEIGHT_TYPE : EXPLICIT",
        &format!("EDGE_WEIGHT_FORMAT : {format}"),
        "EDGE_WEIGHT_SECTION",
        weights,
        "EOF",
        "",
    ]
    .join("\n")
}

#[test]
fn can_read_written_document() {
    let problem = get_example_document().read_tsplib().expect("cannot read problem");

    assert_eq!(problem.dimension, 3);
    assert_eq!(problem.coordinates, Some(vec![(0., 0.), (3., 4.), (0., 1.)]));
    assert_eq!(problem.demands, vec![0, 1, 1]);
    assert_eq!(problem.capacity, Some(30));
    assert_eq!(problem.weight_kind, EdgeWeightKind::Euc2D);
    assert_eq!(problem.matrix[0][1], 5.);
}

#[test]
fn can_read_meta_errors() {
    for &(from, to, error) in &[
        ("TYPE : CVRP", "TYPE : ASD", "expecting 'CVRP' or 'TSP' as TYPE, got 'ASD'"),
        ("DIMENSION : 3", "DIMENSION : asd", "cannot parse DIMENSION: 'invalid digit found in string'"),
        ("EDGE_WEIGHT_TYPE : EUC_2D", "EDGE_WEIGHT_TYPE : GEO", "unknown edge weight type: 'GEO'"),
        ("CAPACITY : 30", "CAPACITY : asd", "cannot parse CAPACITY: 'invalid digit found in string'"),
    ] {
        let document = get_example_document().replace(from, to);

        let result = document.read_tsplib();

        assert_eq!(result.err().map(|err| err.to_string()), Some(error.to_string()));
    }
}

#[test]
fn can_reject_malformed_coord_row() {
    let document = get_example_document().replace("2 3 4", "2 3");

    let result = document.read_tsplib();

    assert_eq!(result.err().map(|err| err.to_string()), Some("unexpected coord data: '2 3'".to_string()));
}

#[test]
fn can_build_square_symmetric_matrix() {
    let problem = get_example_document().read_tsplib().expect("cannot read problem");

    assert_eq!(problem.matrix.len(), problem.dimension);
    for (i, row) in problem.matrix.iter().enumerate() {
        assert_eq!(row.len(), problem.dimension);
        assert_eq!(row[i], 0.);
        for (j, &weight) in row.iter().enumerate() {
            assert_eq!(weight, problem.matrix[j][i]);
        }
    }
}

#[test]
fn can_default_missing_demands() {
    let draft = ProblemDraft::new(vec![(0., 0.), (1., 1.)]);
    let mut buffer = Vec::new();
    write_problem(BufWriter::new(&mut buffer), &draft).expect("cannot write draft");

    let problem = String::from_utf8(buffer).expect("invalid utf8").read_tsplib().expect("cannot read problem");

    assert_eq!(problem.demands, vec![0, 0]);
    assert_eq!(problem.capacity, None);
}

#[test]
fn can_read_explicit_full_matrix() {
    let document = get_explicit_document("FULL_MATRIX", "0 2 3\n2 0 4\n3 4 0");

    let problem = document.read_tsplib().expect("cannot read problem");

    assert_eq!(problem.coordinates, None);
    assert_eq!(problem.weight_kind, EdgeWeightKind::Explicit);
    assert_eq!(problem.matrix, vec![vec![0., 2., 3.], vec![2., 0., 4.], vec![3., 4., 0.]]);
}

#[test]
fn can_read_explicit_lower_row() {
    let document = get_explicit_document("LOWER_ROW", "1\n2 3");

    let problem = document.read_tsplib().expect("cannot read problem");

    assert_eq!(problem.matrix, vec![vec![0., 1., 2.], vec![1., 0., 3.], vec![2., 3., 0.]]);
}

#[test]
fn can_reject_incomplete_weight_section() {
    let document = get_explicit_document("FULL_MATRIX", "0 2 3\n2 0 4");

    let result = document.read_tsplib();

    assert!(result.is_err());
}

#[test]
fn can_read_display_data() {
    let document = get_explicit_document("FULL_MATRIX", "0 2 3\n2 0 4\n3 4 0").replace(
        "EOF",
        "DISPLAY_DATA_SECTION\n1 0 0\n2 1 0\n3 0 1\nEOF",
    );

    let problem = document.read_tsplib().expect("cannot read problem");

    assert_eq!(problem.coordinates, None);
    assert_eq!(problem.display_coordinates, Some(vec![(0., 0.), (1., 0.), (0., 1.)]));
}

#[test]
fn can_reject_depot_other_than_first_node() {
    let document = get_example_document().replace("DEPOT_SECTION\n1\n-1", "DEPOT_SECTION\n2\n-1");

    let result = document.read_tsplib();

    assert_eq!(result.err().map(|err| err.to_string()), Some("expecting node 1 as depot, got 2".to_string()));
}

#[test]
fn can_reject_nonzero_depot_demand() {
    let document = get_example_document().replace("DEMAND_SECTION\n1 0", "DEMAND_SECTION\n1 5");

    let result = document.read_tsplib();

    assert_eq!(
        result.err().map(|err| err.to_string()),
        Some("expecting zero demand for the depot node, got 5".to_string())
    );
}

#[test]
fn can_read_additional_constraints() {
    let document = get_example_document().replace(
        "EDGE_WEIGHT_TYPE : EUC_2D",
        "EDGE_WEIGHT_TYPE : EUC_2D\nVEHICLES : 4\nDISTANCE : 100.5\nSERVICE_TIME : 10",
    );

    let constraints = document.read_tsplib_constraints().expect("cannot read constraints");

    assert_eq!(constraints.vehicles, Some(4));
    assert_eq!(constraints.route_limit, Some(100.5));
    assert_eq!(constraints.service_times, Some(vec![0., 10., 10.]));
}

#[test]
fn can_infer_vehicle_bound_from_name() {
    let document = get_example_document().replace("NAME : temporary", "NAME : E-n51-k5");

    let constraints = document.read_tsplib_constraints().expect("cannot read constraints");

    assert_eq!(constraints.vehicles, Some(5));
}

#[test]
fn can_handle_missing_constraint_keys() {
    let constraints = get_example_document().read_tsplib_constraints().expect("cannot read constraints");

    assert_eq!(constraints.vehicles, None);
    assert_eq!(constraints.route_limit, None);
    assert_eq!(constraints.service_times, None);
}
