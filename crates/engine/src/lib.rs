//! Complexity analysis engine
//!
//! Pipeline for one request:
//!
//! ```text
//! AnalysisRequest
//!   -> prompt::build_analysis_prompt
//!   -> model::ModelClient::generate        (external model service)
//!   -> reply::extract_json / decode_analysis
//!   -> harness::BenchmarkRunner::run       (toolchain subprocess, deadline)
//!   -> series::parse_series
//!   -> AnalysisResult
//! ```
//!
//! Only the benchmark step degrades gracefully: when it fails the result is
//! still returned, with an empty performance series.

pub mod analyzer;
pub mod harness;
pub mod model;
pub mod prompt;
pub mod reply;
pub mod series;

pub use analyzer::{ComplexityAnalyzer, Stage};
pub use harness::{BenchmarkHarness, BenchmarkRunner};
pub use model::{GeminiClient, ModelClient};
