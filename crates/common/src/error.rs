use thiserror::Error;

/// Failures of the analyze operation.
///
/// `Execution` and `Parse` come from the benchmark step and are downgraded to
/// an empty performance series by the relay; the others end the request.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model service error: {0}")]
    Upstream(String),

    #[error("Benchmark execution failed: {reason}")]
    Execution { reason: String, output: String },

    #[error("Benchmark output parse error: {0}")]
    Parse(String),
}

impl AnalyzerError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn execution(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
            output: output.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Machine-readable code for error payloads
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Execution { .. } => "EXECUTION_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
        }
    }

    /// Whether the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }

    /// Whether the failure belongs to the best-effort benchmark step
    pub fn is_benchmark_failure(&self) -> bool {
        matches!(self, Self::Execution { .. } | Self::Parse(_))
    }

    /// Captured subprocess output, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Execution { output, .. } => Some(output),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
