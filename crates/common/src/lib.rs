//! Common types and utilities shared across all crates

pub mod types;
pub mod config;
pub mod error;
pub mod logging;

pub use types::*;
pub use config::*;
pub use error::{AnalyzerError, Result};
pub use logging::{init_cli_tracing, init_tracing_with_level};
