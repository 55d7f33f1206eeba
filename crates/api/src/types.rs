//! Type definitions for the HTTP API

use chrono::{DateTime, Utc};
use complexity_common::AnalyzerError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    pub status: String,

    /// Server version
    pub version: String,

    /// Model identifier analysis requests go to
    pub model: String,

    /// Whether a model service credential is configured. Analysis requests
    /// fail with a configuration error while this is false.
    pub credential_configured: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Machine-readable error code
    pub code: Option<String>,

    /// Timestamp of error
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: Some(code.to_string()),
            timestamp: Utc::now(),
        }
    }
}

impl From<&AnalyzerError> for ErrorResponse {
    fn from(err: &AnalyzerError) -> Self {
        Self::new(err.to_string(), err.code())
    }
}
