#[cfg(test)]
#[path = "../tests/unit/reader_test.rs"]
mod reader_test;

use gateway_core::models::{AdditionalConstraints, Coordinate, EdgeWeightKind};
use gateway_core::{GatewayError, GatewayResult};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

/// The structured return of a parse: everything the canonical problem builder
/// needs to adapt a document into a problem.
#[derive(Clone, Debug)]
pub struct ParsedProblem {
    /// Amount of nodes including the depot.
    pub dimension: usize,
    /// Node coordinates when the document carries a NODE_COORD_SECTION.
    pub coordinates: Option<Vec<Coordinate>>,
    /// Display only coordinates from a DISPLAY_DATA_SECTION.
    pub display_coordinates: Option<Vec<Coordinate>>,
    /// Customer demands, all zero when the document has no DEMAND_SECTION.
    pub demands: Vec<i64>,
    /// A full square distance matrix.
    pub matrix: Vec<Vec<f64>>,
    /// Vehicle capacity when declared.
    pub capacity: Option<i64>,
    /// Distance semantics of the document.
    pub weight_kind: EdgeWeightKind,
}

/// A trait to read a tsplib95 problem.
pub trait TsplibProblem {
    /// Reads a tsplib95 problem.
    fn read_tsplib(self) -> GatewayResult<ParsedProblem>;
}

impl<R: Read> TsplibProblem for BufReader<R> {
    fn read_tsplib(self) -> GatewayResult<ParsedProblem> {
        TsplibReader::new(self).read_problem()
    }
}

impl TsplibProblem for String {
    fn read_tsplib(self) -> GatewayResult<ParsedProblem> {
        TsplibReader::new(BufReader::new(self.as_bytes())).read_problem()
    }
}

/// A trait to read the auxiliary constraints of a tsplib95 problem.
pub trait TsplibConstraints {
    /// Reads vehicle bound, route length limit and service times.
    fn read_tsplib_constraints(self) -> GatewayResult<AdditionalConstraints>;
}

impl<R: Read> TsplibConstraints for BufReader<R> {
    fn read_tsplib_constraints(self) -> GatewayResult<AdditionalConstraints> {
        read_constraints(self)
    }
}

impl TsplibConstraints for String {
    fn read_tsplib_constraints(self) -> GatewayResult<AdditionalConstraints> {
        read_constraints(BufReader::new(self.as_bytes()))
    }
}

struct TsplibReader<R: Read> {
    buffer: String,
    reader: BufReader<R>,
    dimension: Option<usize>,
    capacity: Option<i64>,
    weight_kind: Option<EdgeWeightKind>,
    weight_format: Option<String>,
    coordinates: Option<FxHashMap<usize, Coordinate>>,
    display: Option<FxHashMap<usize, Coordinate>>,
    demands: Option<FxHashMap<usize, i64>>,
    weights: Option<Vec<f64>>,
    depot: Option<usize>,
}

impl<R: Read> TsplibReader<R> {
    fn new(reader: BufReader<R>) -> Self {
        Self {
            buffer: String::new(),
            reader,
            dimension: None,
            capacity: None,
            weight_kind: None,
            weight_format: None,
            coordinates: None,
            display: None,
            demands: None,
            weights: None,
            depot: None,
        }
    }

    fn read_problem(mut self) -> GatewayResult<ParsedProblem> {
        loop {
            let Some(line) = self.read_line()? else { break };
            let line = line.trim().to_string();

            if line.is_empty() {
                continue;
            }

            if line == "EOF" {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                self.read_header(key.trim(), value.trim())?;
            } else {
                self.read_section(&line)?;
            }
        }

        self.finish()
    }

    fn read_header(&mut self, key: &str, value: &str) -> GatewayResult<()> {
        match key {
            "TYPE" => {
                if value != "CVRP" && value != "TSP" {
                    return Err(GatewayError::Input(format!("expecting 'CVRP' or 'TSP' as TYPE, got '{value}'")));
                }
            }
            "DIMENSION" => {
                let dimension = parse_num(value, "cannot parse DIMENSION")?;
                if dimension == 0 {
                    return Err(GatewayError::Input("DIMENSION must be positive".to_string()));
                }
                self.dimension = Some(dimension);
            }
            "EDGE_WEIGHT_TYPE" => self.weight_kind = Some(value.parse()?),
            "EDGE_WEIGHT_FORMAT" => self.weight_format = Some(value.to_string()),
            "CAPACITY" => self.capacity = Some(parse_num(value, "cannot parse CAPACITY")?),
            // NAME, COMMENT, display hints and the constraint keys handled by
            // the second pass are not needed to build the problem
            _ => {}
        }

        Ok(())
    }

    fn read_section(&mut self, line: &str) -> GatewayResult<()> {
        match line {
            "NODE_COORD_SECTION" => {
                let rows = self.read_coord_rows()?;
                self.coordinates = Some(rows);
            }
            "DISPLAY_DATA_SECTION" => {
                let rows = self.read_coord_rows()?;
                self.display = Some(rows);
            }
            "DEMAND_SECTION" => {
                let rows = self.read_demand_rows()?;
                self.demands = Some(rows);
            }
            "EDGE_WEIGHT_SECTION" => {
                let weights = self.read_weight_rows()?;
                self.weights = Some(weights);
            }
            "DEPOT_SECTION" => self.read_depot_rows()?,
            _ => return Err(GatewayError::Input(format!("unexpected line: '{line}'"))),
        }

        Ok(())
    }

    fn read_coord_rows(&mut self) -> GatewayResult<FxHashMap<usize, Coordinate>> {
        let dimension = self.declared_dimension()?;

        let mut rows = FxHashMap::default();
        for _ in 0..dimension {
            let line = self.read_required_line("coord section")?;
            let data = line.split_whitespace().collect::<Vec<_>>();

            if data.len() != 3 {
                return Err(GatewayError::Input(format!("unexpected coord data: '{line}'")));
            }

            let coord = (parse_num(data[1], "cannot parse coord.0")?, parse_num(data[2], "cannot parse coord.1")?);

            rows.insert(parse_num(data[0], "cannot parse id")?, coord);
        }

        Ok(rows)
    }

    fn read_demand_rows(&mut self) -> GatewayResult<FxHashMap<usize, i64>> {
        let dimension = self.declared_dimension()?;

        let mut rows = FxHashMap::default();
        for _ in 0..dimension {
            let line = self.read_required_line("demand section")?;
            let data = line.split_whitespace().collect::<Vec<_>>();

            if data.len() != 2 {
                return Err(GatewayError::Input(format!("unexpected demand data: '{line}'")));
            }

            rows.insert(parse_num(data[0], "cannot parse id")?, parse_num(data[1], "cannot parse demand")?);
        }

        Ok(rows)
    }

    fn read_weight_rows(&mut self) -> GatewayResult<Vec<f64>> {
        let dimension = self.declared_dimension()?;

        let format = self.weight_format.clone().unwrap_or_else(|| "FULL_MATRIX".to_string());
        let expected = match format.as_str() {
            "FULL_MATRIX" => dimension * dimension,
            "LOWER_ROW" => dimension * (dimension - 1) / 2,
            _ => return Err(GatewayError::Input(format!("unsupported EDGE_WEIGHT_FORMAT: '{format}'"))),
        };

        let mut weights = Vec::with_capacity(expected);
        while weights.len() < expected {
            let line = self.read_required_line("edge weight section")?;
            for token in line.split_whitespace() {
                weights.push(parse_num(token, "cannot parse edge weight")?);
            }
        }

        if weights.len() != expected {
            return Err(GatewayError::Input(format!(
                "unexpected amount of edge weights: expecting {expected}, got {}",
                weights.len()
            )));
        }

        Ok(weights)
    }

    fn read_depot_rows(&mut self) -> GatewayResult<()> {
        loop {
            let line = self.read_required_line("depot section")?;
            if line == "-1" {
                return Ok(());
            }

            let depot = parse_num(&line, "cannot parse depot id")?;
            if self.depot.replace(depot).is_some() {
                return Err(GatewayError::Input("multiple depots are not supported".to_string()));
            }
        }
    }

    fn finish(self) -> GatewayResult<ParsedProblem> {
        let dimension = self.declared_dimension()?;
        let weight_kind = self.weight_kind.unwrap_or(EdgeWeightKind::Euc2D);

        let coordinates = self.coordinates.map(|rows| collect_rows(rows, dimension, "coordinate")).transpose()?;
        let display_coordinates = self.display.map(|rows| collect_rows(rows, dimension, "display data")).transpose()?;

        let demands = match self.demands {
            Some(rows) => collect_rows(rows, dimension, "demand")?,
            None => vec![0; dimension],
        };

        if demands[0] != 0 {
            return Err(GatewayError::Input(format!("expecting zero demand for the depot node, got {}", demands[0])));
        }

        if let Some(depot) = self.depot {
            if depot != 1 {
                return Err(GatewayError::Input(format!("expecting node 1 as depot, got {depot}")));
            }
        }

        let matrix = match weight_kind {
            EdgeWeightKind::Explicit => {
                let weights = self
                    .weights
                    .ok_or_else(|| GatewayError::Input("EDGE_WEIGHT_SECTION is missing for EXPLICIT weights".to_string()))?;
                let format = self.weight_format.as_deref().unwrap_or("FULL_MATRIX");
                build_explicit_matrix(&weights, format, dimension)
            }
            kind => {
                let coordinates = coordinates.as_ref().ok_or_else(|| {
                    GatewayError::Input(format!("'{kind}' weights require NODE_COORD_SECTION"))
                })?;
                build_metric_matrix(kind, coordinates)?
            }
        };

        Ok(ParsedProblem {
            dimension,
            coordinates,
            display_coordinates,
            demands,
            matrix,
            capacity: self.capacity,
            weight_kind,
        })
    }

    fn declared_dimension(&self) -> GatewayResult<usize> {
        self.dimension.ok_or_else(|| GatewayError::Input("DIMENSION must be declared before any section".to_string()))
    }

    fn read_required_line(&mut self, context: &str) -> GatewayResult<String> {
        let line = self.read_line()?.map(|line| line.trim().to_string());
        line.ok_or_else(|| GatewayError::Input(format!("unexpected end of input in {context}")))
    }

    fn read_line(&mut self) -> GatewayResult<Option<&str>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 { Ok(None) } else { Ok(Some(self.buffer.as_str())) }
    }
}

fn read_constraints<R: Read>(mut reader: BufReader<R>) -> GatewayResult<AdditionalConstraints> {
    let mut name = None;
    let mut dimension: Option<usize> = None;
    let mut vehicles = None;
    let mut route_limit = None;
    let mut service_time: Option<f64> = None;

    let mut buffer = String::new();
    loop {
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }

        if let Some((key, value)) = buffer.trim().split_once(':') {
            let value = value.trim();
            match key.trim() {
                "NAME" => name = Some(value.to_string()),
                "DIMENSION" => dimension = Some(parse_num(value, "cannot parse DIMENSION")?),
                "VEHICLES" | "NUMBER_OF_TRUCKS" => vehicles = Some(parse_num(value, "cannot parse vehicle amount")?),
                "DISTANCE" => route_limit = Some(parse_num(value, "cannot parse DISTANCE")?),
                "SERVICE_TIME" => service_time = Some(parse_num(value, "cannot parse SERVICE_TIME")?),
                _ => {}
            }
        }
    }

    // benchmark instances often carry the vehicle bound in the name suffix, e.g. E-n51-k5
    if vehicles.is_none() {
        vehicles = name.and_then(|name| name.rsplit_once("-k").and_then(|(_, bound)| bound.parse().ok()));
    }

    let service_times = match (service_time, dimension) {
        (Some(service_time), Some(dimension)) if dimension > 0 => {
            Some((0..dimension).map(|node| if node == 0 { 0. } else { service_time }).collect())
        }
        _ => None,
    };

    Ok(AdditionalConstraints { vehicles, route_limit, service_times })
}

fn collect_rows<T: Copy>(rows: FxHashMap<usize, T>, dimension: usize, what: &str) -> GatewayResult<Vec<T>> {
    (1..=dimension)
        .map(|id| {
            rows.get(&id).copied().ok_or_else(|| GatewayError::Input(format!("cannot find {what} for id: '{id}'")))
        })
        .collect()
}

fn build_explicit_matrix(weights: &[f64], format: &str, dimension: usize) -> Vec<Vec<f64>> {
    match format {
        "LOWER_ROW" => {
            let mut matrix = vec![vec![0.; dimension]; dimension];
            let mut idx = 0;
            for i in 1..dimension {
                for j in 0..i {
                    matrix[i][j] = weights[idx];
                    matrix[j][i] = weights[idx];
                    idx += 1;
                }
            }
            matrix
        }
        _ => weights.chunks(dimension).map(<[f64]>::to_vec).collect(),
    }
}

fn build_metric_matrix(kind: EdgeWeightKind, coordinates: &[Coordinate]) -> GatewayResult<Vec<Vec<f64>>> {
    coordinates
        .par_iter()
        .map(|&from| coordinates.iter().map(|&to| kind.metric_weight(from, to)).collect::<Option<Vec<_>>>())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| GatewayError::Internal("cannot compute weights without a metric".to_string()))
}

fn parse_num<T: FromStr>(data: &str, err_msg: &str) -> GatewayResult<T>
where
    T::Err: std::fmt::Display,
{
    data.parse::<T>().map_err(|err| GatewayError::Input(format!("{err_msg}: '{err}'")))
}
