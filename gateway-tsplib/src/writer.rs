#[cfg(test)]
#[path = "../tests/unit/writer_test.rs"]
mod writer_test;

use gateway_core::models::{Coordinate, EdgeWeightKind};
use gateway_core::{GatewayError, GatewayResult};
use std::io::{BufWriter, Write};

/// A problem draft ready to be serialized into the text format. This is the
/// shape inline client input is collected into before the round trip through
/// the parser produces the canonical problem.
#[derive(Clone, Debug)]
pub struct ProblemDraft {
    /// Instance name written into the NAME header.
    pub name: String,
    /// Problem type tag, e.g. `CVRP`.
    pub problem_type: String,
    /// Node coordinates, depot first.
    pub coordinates: Vec<Coordinate>,
    /// Customer demands, omitted from the document when `None`.
    pub demands: Option<Vec<i64>>,
    /// Vehicle capacity, omitted from the document when `None`.
    pub capacity: Option<i64>,
    /// Distance semantics of the instance.
    pub weight_kind: EdgeWeightKind,
    /// One based id of the depot node.
    pub depot: usize,
}

impl ProblemDraft {
    /// Creates a draft with the conventional defaults: CVRP type, euclidean
    /// weights, first node as the depot.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            name: "temporary".to_string(),
            problem_type: "CVRP".to_string(),
            coordinates,
            demands: None,
            capacity: None,
            weight_kind: EdgeWeightKind::Euc2D,
            depot: 1,
        }
    }
}

/// Writes the draft as a TSPLIB document with the sections in their required
/// order: headers, NODE_COORD_SECTION, optional DEMAND_SECTION, DEPOT_SECTION
/// with its `-1` terminator, EOF marker.
pub fn write_problem<W: Write>(writer: BufWriter<W>, draft: &ProblemDraft) -> GatewayResult<()> {
    let mut writer = writer;

    if draft.coordinates.is_empty() {
        return Err(GatewayError::Input("cannot write a problem without coordinates".to_string()));
    }

    writeln!(writer, "NAME : {}", draft.name)?;
    writeln!(writer, "TYPE : {}", draft.problem_type)?;
    writeln!(writer, "DIMENSION : {}", draft.coordinates.len())?;
    writeln!(writer, "EDGE_WEIGHT_TYPE : {}", draft.weight_kind)?;
    if let Some(capacity) = draft.capacity {
        writeln!(writer, "CAPACITY : {capacity}")?;
    }

    writeln!(writer, "NODE_COORD_SECTION")?;
    for (idx, (x, y)) in draft.coordinates.iter().enumerate() {
        writeln!(writer, "{} {x} {y}", idx + 1)?;
    }

    if let Some(demands) = draft.demands.as_ref() {
        writeln!(writer, "DEMAND_SECTION")?;
        for (idx, demand) in demands.iter().enumerate() {
            writeln!(writer, "{} {demand}", idx + 1)?;
        }
    }

    writeln!(writer, "DEPOT_SECTION")?;
    writeln!(writer, "{}", draft.depot)?;
    writeln!(writer, "-1")?;
    writeln!(writer, "EOF")?;

    writer.flush()?;

    Ok(())
}
