use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Inbound request for a single complexity analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AnalysisRequest {
    /// Source code to classify. A missing field decodes as empty and is
    /// rejected by validation rather than by the decoder.
    #[serde(default)]
    pub code: String,

    /// Language of the submitted code, embedded verbatim in the prompt
    #[serde(default)]
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }
}

/// One benchmarked input size and its measured time per iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PerformancePoint {
    /// Input size `n` the generated program ran with
    #[serde(rename = "size")]
    pub input_size: u64,

    /// Average elapsed milliseconds per iteration
    #[serde(rename = "time")]
    pub elapsed_millis: f64,
}

impl PerformancePoint {
    pub fn new(input_size: u64, elapsed_millis: f64) -> Self {
        Self {
            input_size,
            elapsed_millis,
        }
    }
}

/// Parsed benchmark output: the points in print order plus the number of
/// non-blank lines that were not in `size,time` form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceSeries {
    pub points: Vec<PerformancePoint>,
    pub skipped_lines: usize,
}

impl PerformanceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The JSON object the model is instructed to reply with.
///
/// Every field is required. Anything else the model adds (notably a
/// `performanceData` array of its own) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAnalysis {
    pub complexity: String,

    pub confidence: f64,

    #[serde(rename = "staticAnalysis")]
    pub static_analysis_notes: Vec<String>,

    #[serde(rename = "testCode")]
    pub generated_test_program: String,
}

/// Result returned to the caller of the analyze operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AnalysisResult {
    /// Big-O classification, e.g. `O(n log n)`
    pub complexity: String,

    /// Model confidence, 0 to 100
    pub confidence: f64,

    /// Observations about what the submitted code does
    #[serde(rename = "staticAnalysis")]
    pub static_analysis_notes: Vec<String>,

    /// Benchmark program synthesized by the model
    #[serde(rename = "testCode")]
    pub generated_test_program: String,

    /// Measured series; empty when the benchmark could not be run or parsed
    #[serde(rename = "performanceData")]
    pub performance_series: Vec<PerformancePoint>,

    /// Benchmark output lines that were not in `size,time` form
    #[serde(rename = "skippedLines", default, skip_serializing_if = "Option::is_none")]
    pub skipped_lines: Option<usize>,
}

impl AnalysisResult {
    /// Build a result from the decoded model reply with an empty series.
    pub fn from_model(analysis: ModelAnalysis) -> Self {
        Self {
            complexity: analysis.complexity,
            confidence: analysis.confidence,
            static_analysis_notes: analysis.static_analysis_notes,
            generated_test_program: analysis.generated_test_program,
            performance_series: Vec::new(),
            skipped_lines: None,
        }
    }

    /// Replace the series as a unit with a successfully parsed one.
    pub fn with_series(mut self, series: PerformanceSeries) -> Self {
        self.performance_series = series.points;
        self.skipped_lines = Some(series.skipped_lines);
        self
    }

    pub fn has_benchmark(&self) -> bool {
        !self.performance_series.is_empty()
    }
}
