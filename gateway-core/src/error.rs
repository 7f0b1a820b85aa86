#[cfg(test)]
#[path = "../tests/unit/error_test.rs"]
mod error_test;

/// An error which keeps the failure kind next to a human readable message, so
/// that callers branch on the kind instead of matching on message contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// Malformed or incomplete client input.
    Input(String),
    /// No algorithm is registered under the requested identifier.
    NotFound(String),
    /// The entry point's backing implementation cannot be loaded.
    Unavailable(String),
    /// The entry point rejected both calling conventions.
    Interface(String),
    /// The solver body failed while running.
    Solver(String),
    /// A transient artifact could not be written or removed.
    Resource(String),
    /// Any other failure inside the gateway.
    Internal(String),
}

/// A type alias for result type with `GatewayError`.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Returns the message carried by the error.
    pub fn message(&self) -> &str {
        match self {
            Self::Input(msg)
            | Self::NotFound(msg)
            | Self::Unavailable(msg)
            | Self::Interface(msg)
            | Self::Solver(msg)
            | Self::Resource(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Returns a short stable tag of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::NotFound(_) => "not-found",
            Self::Unavailable(_) => "unavailable",
            Self::Interface(_) => "interface",
            Self::Solver(_) => "solver",
            Self::Resource(_) => "resource",
            Self::Internal(_) => "internal",
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GatewayError {}

impl From<std::io::Error> for GatewayError {
    fn from(value: std::io::Error) -> Self {
        Self::Resource(value.to_string())
    }
}
