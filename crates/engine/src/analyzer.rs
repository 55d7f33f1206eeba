//! Request relay: validate, query the model, benchmark, respond.

use std::fmt;
use std::sync::Arc;

use complexity_common::{
    AnalysisRequest, AnalysisResult, AnalyzerError, ModelAnalysis, PerformanceSeries, Result,
    SystemConfig,
};
use tracing::{debug, info, instrument, warn};

use crate::harness::{BenchmarkHarness, BenchmarkRunner};
use crate::model::{GeminiClient, ModelClient};
use crate::prompt::build_analysis_prompt;
use crate::reply::{decode_analysis, extract_json};
use crate::series::parse_series;

/// How much captured benchmark output goes into the diagnostic log line
const LOGGED_OUTPUT_CHARS: usize = 2000;

/// Relay stages. Each request moves forward only; the first error jumps
/// straight to `Responding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Processing,
    Responding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => write!(f, "validating"),
            Self::Processing => write!(f, "processing"),
            Self::Responding => write!(f, "responding"),
        }
    }
}

/// Runs one analyze request end to end.
///
/// Holds no per-request state; concurrent calls share only the model client
/// and the harness configuration.
pub struct ComplexityAnalyzer {
    model: Arc<dyn ModelClient>,
    runner: Arc<dyn BenchmarkRunner>,
}

impl ComplexityAnalyzer {
    pub fn new(model: Arc<dyn ModelClient>, runner: Arc<dyn BenchmarkRunner>) -> Self {
        Self { model, runner }
    }

    /// Production wiring: Gemini client plus subprocess harness.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let model = GeminiClient::new(&config.model)?;
        let harness = BenchmarkHarness::new(config.harness.clone());
        Ok(Self::new(Arc::new(model), Arc::new(harness)))
    }

    pub fn model_client(&self) -> &dyn ModelClient {
        self.model.as_ref()
    }

    #[instrument(skip_all, fields(language = %request.language, code_len = request.code.len()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        debug!(stage = %Stage::Validating, "Relay stage");
        validate(request)?;

        debug!(stage = %Stage::Processing, "Relay stage");
        let analysis = match self.query_model(request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                debug!(stage = %Stage::Responding, error = %e, "Request failed");
                return Err(e);
            }
        };
        let result = self.attach_benchmark(AnalysisResult::from_model(analysis)).await;

        debug!(stage = %Stage::Responding, "Relay stage");
        info!(
            complexity = %result.complexity,
            confidence = result.confidence,
            points = result.performance_series.len(),
            "Analysis complete"
        );
        Ok(result)
    }

    async fn query_model(&self, request: &AnalysisRequest) -> Result<ModelAnalysis> {
        let prompt = build_analysis_prompt(&request.code, &request.language);
        let reply = self.model.generate(&prompt).await?;
        decode_analysis(extract_json(&reply))
    }

    /// Run the generated program and attach its series. Failures here only
    /// leave the series empty.
    async fn attach_benchmark(&self, result: AnalysisResult) -> AnalysisResult {
        if result.generated_test_program.trim().is_empty() {
            warn!("Model returned no test program, skipping benchmark");
            return result;
        }

        match self.benchmark(&result.generated_test_program).await {
            Ok(series) => {
                debug!(points = series.len(), skipped = series.skipped_lines, "Benchmark parsed");
                result.with_series(series)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    code = e.code(),
                    output = %e.output().map(|o| tail(o, LOGGED_OUTPUT_CHARS)).unwrap_or_default(),
                    "Benchmark failed, returning empty performance series"
                );
                result
            }
        }
    }

    async fn benchmark(&self, program: &str) -> Result<PerformanceSeries> {
        let output = self.runner.run(program).await?;
        parse_series(&output)
    }
}

fn validate(request: &AnalysisRequest) -> Result<()> {
    if request.code.is_empty() {
        return Err(AnalyzerError::bad_request("Code is required"));
    }
    Ok(())
}

/// Last `max` characters of `s`
fn tail(s: &str, max: usize) -> &str {
    let count = s.chars().count();
    if count <= max {
        return s;
    }
    let start = s.char_indices().nth(count - max).map(|(i, _)| i).unwrap_or(0);
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_short_strings() {
        assert_eq!(tail("abc", 10), "abc");
    }

    #[test]
    fn test_tail_respects_char_boundaries() {
        assert_eq!(tail("ααβγ", 2), "βγ");
    }

    #[test]
    fn test_validate_rejects_empty_code_only() {
        assert!(validate(&AnalysisRequest::new("", "go")).is_err());
        assert!(validate(&AnalysisRequest::new("x", "")).is_ok());
    }
}
