use crate::build::{build_problem, ProblemInput};
use crate::executor::{execute, SolveOptions};
use crate::registry::{AlgorithmMeta, Registry};
use crate::respond::{assemble, ResponsePayload};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gateway_core::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Process wide state shared across requests. The registry is read-only after
/// startup, everything else a request touches stays request-local.
pub struct AppState {
    /// The algorithm entries loaded at startup.
    pub registry: Registry,
}

/// The body of a solve request: the problem input plus the algorithm selector
/// and request scoped options.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    /// Identifier of the algorithm to run.
    pub algorithm: String,
    /// The problem shape, inline or encoded file.
    #[serde(flatten)]
    pub input: ProblemInput,
    /// A limit on the length of a single route.
    #[serde(default)]
    pub route_limit: Option<f64>,
    /// Whether the result must be a single route.
    #[serde(default)]
    pub single: bool,
    /// Whether the entry should prefer fewer routes over shorter ones.
    #[serde(default)]
    pub minimize_routes: bool,
    /// Free form options, passed through only when the entry declares them.
    #[serde(default)]
    pub extras: HashMap<String, Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Builds the transport surface: the static entry document, the algorithm
/// enumeration and the solve endpoint.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/algorithms", get(algorithms))
        .route("/run", post(run))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn algorithms(State(state): State<Arc<AppState>>) -> Json<Vec<AlgorithmMeta>> {
    Json(state.registry.list().to_vec())
}

async fn run(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = match serde_json::from_slice::<RunRequest>(&body) {
        Ok(request) => request,
        Err(err) => return error_response(&GatewayError::Input(format!("cannot parse request body: '{err}'"))),
    };

    // the solve pipeline is blocking by design: there is no cancellation or
    // timeout around a solver invocation
    let outcome = tokio::task::spawn_blocking(move || handle_run(&state, &request)).await;

    match outcome {
        Ok(Ok(payload)) => (StatusCode::OK, Json(payload)).into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(err) => error_response(&GatewayError::Internal(format!("solve task failed: '{err}'"))),
    }
}

fn handle_run(state: &AppState, request: &RunRequest) -> GatewayResult<ResponsePayload> {
    let (problem, constraints) = build_problem(&request.input)?;

    let entry = state.registry.resolve(&request.algorithm)?;

    let options = SolveOptions {
        capacity: request.input.capacity,
        route_limit: request.route_limit,
        single_route: request.single,
        minimize_routes: request.minimize_routes,
        extras: request.extras.clone(),
    };

    let outcome = execute(entry, &problem, &constraints, &options)?;

    info!(algorithm = %entry.id, elapsed_time = outcome.elapsed_time, "solved problem with {} nodes", problem.dimension);

    Ok(assemble(&problem, &constraints, &options, &outcome))
}

/// Maps the error taxonomy onto the http contract: input errors are the
/// caller's fault, everything else surfaces as an internal error. The body is
/// always a single `error` field, a failed request never carries payload
/// fields.
fn error_response(error: &GatewayError) -> Response {
    let status = match error {
        GatewayError::Input(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!(kind = error.kind(), "request failed: {error}");

    (status, Json(ErrorBody { error: error.to_string() })).into_response()
}
