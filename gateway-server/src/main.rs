//! The gateway executable: binds the listener and serves the adaptation layer
//! around the default algorithm catalog.

use clap::{value_parser, Arg, Command};
use gateway_server::catalog::default_catalog;
use gateway_server::http::{build_router, AppState};
use gateway_server::registry::Registry;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("vrp-gateway")
        .about("A request/response gateway around pluggable VRP solver entry points")
        .arg(
            Arg::new("host")
                .long("host")
                .help("Address to bind the listener to")
                .default_value("0.0.0.0")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .help("Port to serve on")
                .default_value("8000")
                .value_parser(value_parser!(u16)),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = cli().get_matches();
    let host = matches.get_one::<String>("host").cloned().unwrap_or_default();
    let port = *matches.get_one::<u16>("port").unwrap_or(&8000);

    let state = Arc::new(AppState { registry: Registry::new(default_catalog()) });
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await.unwrap_or_else(|err| {
        eprintln!("cannot bind '{host}:{port}': '{err}'");
        process::exit(1);
    });

    tracing::info!("serving at port {port}");

    axum::serve(listener, router).await.unwrap_or_else(|err| {
        eprintln!("server failed: '{err}'");
        process::exit(1);
    });
}
