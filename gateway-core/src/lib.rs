//! Core crate of the solve gateway: the canonical problem representation,
//! pure operations over solution encodings and the call contract consumed by
//! pluggable solver entry points.
//!
//! Everything here is transport agnostic: the http surface lives in
//! `gateway-server`, the domain text codec in `gateway-tsplib`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Canonical problem representation and related value types.
pub mod models;
/// Pure operations over solution encodings.
pub mod ops;
/// The call contract between the gateway and solver entry points.
pub mod solver;

mod error;
pub use error::{GatewayError, GatewayResult};
