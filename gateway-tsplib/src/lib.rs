//! A codec for a subset of the TSPLIB95 format. Please note that it is not a
//! complete implementation of the format specification: it covers the
//! sections the gateway round trips client input through, plus the explicit
//! weight layouts commonly found in CVRP benchmark files.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Reads problems and auxiliary constraints from the text format.
pub mod reader;
/// Serializes a problem draft into the text format.
pub mod writer;

use gateway_core::models::AdditionalConstraints;
use gateway_core::GatewayResult;
use reader::{ParsedProblem, TsplibConstraints, TsplibProblem};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a problem from a file on durable storage.
pub fn read_problem(path: &Path) -> GatewayResult<ParsedProblem> {
    BufReader::new(File::open(path)?).read_tsplib()
}

/// Reads auxiliary constraints from a second pass over the same file.
pub fn read_constraints(path: &Path) -> GatewayResult<AdditionalConstraints> {
    BufReader::new(File::open(path)?).read_tsplib_constraints()
}
