#[cfg(test)]
#[path = "../tests/unit/build_test.rs"]
mod build_test;

use base64::prelude::*;
use gateway_core::models::{AdditionalConstraints, Coordinate, Problem};
use gateway_core::{ops, GatewayError, GatewayResult};
use gateway_tsplib::reader::ParsedProblem;
use gateway_tsplib::writer::{write_problem, ProblemDraft};
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// The client facing problem shape: either inline coordinate data or an
/// encoded problem file, never both.
#[derive(Debug, Default, Deserialize)]
pub struct ProblemInput {
    /// Inline coordinate entries, each one must be a `[x, y]` numeric pair.
    #[serde(default)]
    pub coordinates: Option<Vec<Value>>,
    /// Customer demands matching the coordinate entries.
    #[serde(default)]
    pub customer_demands: Option<Vec<i64>>,
    /// Vehicle capacity.
    #[serde(default)]
    pub capacity: Option<i64>,
    /// Edge weight type tag, defaults to `EUC_2D`.
    #[serde(default)]
    pub edge_weight_type: Option<String>,
    /// Problem type tag, defaults to `CVRP`.
    #[serde(default)]
    pub problem_type: Option<String>,
    /// One based id of the depot node, defaults to the first node.
    #[serde(default)]
    pub depot_node: Option<usize>,
    /// A base64 encoded problem file in the domain text format.
    #[serde(default)]
    pub vrp_file: Option<String>,
}

/// Builds the canonical problem from client input. Both input shapes are
/// materialized through the text format and round tripped through the parser,
/// so every request is canonicalized the same way.
pub fn build_problem(input: &ProblemInput) -> GatewayResult<(Problem, AdditionalConstraints)> {
    let bytes = match (input.coordinates.as_ref(), input.vrp_file.as_ref()) {
        (Some(_), Some(_)) => {
            return Err(GatewayError::Input(
                "either inline coordinates or an encoded problem file must be provided, not both".to_string(),
            ));
        }
        (Some(entries), None) => serialize_inline(input, entries)?,
        (None, Some(encoded)) => BASE64_STANDARD
            .decode(encoded.trim())
            .map_err(|err| GatewayError::Input(format!("cannot decode problem file: '{err}'")))?,
        (None, None) => {
            return Err(GatewayError::Input("coordinates or vrp_file must be provided".to_string()));
        }
    };

    let (parsed, constraints) = parse_round_trip(&bytes)?;

    Ok((adapt(parsed)?, constraints))
}

/// Writes the document to a transient artifact, parses it twice (problem and
/// auxiliary constraints) and removes the artifact. Removal is bound to the
/// artifact guard, so it happens on every exit path including parse failure.
fn parse_round_trip(bytes: &[u8]) -> GatewayResult<(ParsedProblem, AdditionalConstraints)> {
    debug!("transient problem document:\n{}", String::from_utf8_lossy(bytes));

    let mut artifact = TransientArtifact::create()?;
    artifact.write(bytes)?;

    let result = gateway_tsplib::read_problem(artifact.path())
        .and_then(|parsed| Ok((parsed, gateway_tsplib::read_constraints(artifact.path())?)));
    let removed = artifact.close();

    let parsed = result?;
    removed?;

    Ok(parsed)
}

fn serialize_inline(input: &ProblemInput, entries: &[Value]) -> GatewayResult<Vec<u8>> {
    let coordinates = filter_coordinates(entries);
    if coordinates.is_empty() {
        return Err(GatewayError::Input("coordinates must contain at least one valid [x, y] pair".to_string()));
    }

    if let Some(demands) = input.customer_demands.as_ref() {
        if demands.len() != coordinates.len() {
            return Err(GatewayError::Input(format!(
                "customer_demands length {} does not match the amount of valid coordinates {}",
                demands.len(),
                coordinates.len()
            )));
        }
    }

    let mut draft = ProblemDraft::new(coordinates);
    draft.demands = input.customer_demands.clone();
    draft.capacity = input.capacity;
    draft.weight_kind = input.edge_weight_type.as_deref().map(str::parse).transpose()?.unwrap_or(draft.weight_kind);
    if let Some(problem_type) = input.problem_type.as_ref() {
        draft.problem_type = problem_type.clone();
    }
    if let Some(depot) = input.depot_node {
        draft.depot = depot;
    }

    let mut buffer = Vec::new();
    write_problem(BufWriter::new(&mut buffer), &draft)?;

    Ok(buffer)
}

/// Keeps coordinate entries which are two element numeric arrays and skips
/// everything else with a warning: a malformed entry is tolerated, not fatal.
fn filter_coordinates(entries: &[Value]) -> Vec<Coordinate> {
    entries
        .iter()
        .filter_map(|entry| {
            let pair = entry.as_array().filter(|pair| pair.len() == 2);
            let coord = pair.and_then(|pair| pair[0].as_f64().zip(pair[1].as_f64()));
            if coord.is_none() {
                warn!("skipping invalid coordinate entry: {entry}");
            }
            coord
        })
        .collect()
}

/// Adapts the structured parse result into the canonical problem. A document
/// without spatial data gets placeholder coordinates synthesized from the
/// demands, so components which expect coordinates keep functioning.
fn adapt(parsed: ParsedProblem) -> GatewayResult<Problem> {
    let ParsedProblem { coordinates, display_coordinates, demands, matrix, capacity, weight_kind, .. } = parsed;

    // the matrix keeps its parsed semantics, synthesized coordinates are a
    // rendering aid only
    let coordinates =
        coordinates.or(display_coordinates).unwrap_or_else(|| ops::synthesize_coordinates(&demands).0);

    Problem::new(Some(coordinates), demands, matrix, capacity, weight_kind)
}

/// A transient file holding the document between serialization and parsing.
/// Dropping the guard removes the file, an explicit [`TransientArtifact::close`]
/// surfaces removal failures on the success path.
struct TransientArtifact {
    file: NamedTempFile,
}

impl TransientArtifact {
    fn create() -> GatewayResult<Self> {
        let file = tempfile::Builder::new()
            .prefix("vrp-gateway-")
            .suffix(".vrp")
            .tempfile()
            .map_err(|err| GatewayError::Resource(format!("cannot create transient problem file: '{err}'")))?;

        Ok(Self { file })
    }

    fn write(&mut self, bytes: &[u8]) -> GatewayResult<()> {
        self.file.write_all(bytes)?;
        self.file.flush()?;

        Ok(())
    }

    fn path(&self) -> &Path {
        self.file.path()
    }

    fn close(self) -> GatewayResult<()> {
        self.file.close().map_err(|err| GatewayError::Resource(format!("cannot remove transient problem file: '{err}'")))
    }
}
