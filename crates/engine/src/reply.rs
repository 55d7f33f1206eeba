//! Turning the model's raw reply text into a validated [`ModelAnalysis`].

use complexity_common::{AnalyzerError, ModelAnalysis, Result};

const FENCE: &str = "```";

/// Strip optional markdown fence wrapping from `text`.
///
/// With a fence present, everything up to and including the first newline is
/// dropped, then everything from the last fence onwards. The result is always
/// trimmed. Never fails; invalid JSON is left for the decoder to reject.
pub fn extract_json(text: &str) -> &str {
    let mut body = text;
    if body.contains(FENCE) {
        if let Some(start) = body.find('\n') {
            body = &body[start + 1..];
        }
        if let Some(end) = body.rfind(FENCE) {
            body = &body[..end];
        }
    }
    body.trim()
}

/// Decode the extracted JSON strictly.
///
/// All four fields are required, `complexity` must be non-blank and
/// `confidence` must lie in `[0, 100]`.
pub fn decode_analysis(json: &str) -> Result<ModelAnalysis> {
    let analysis: ModelAnalysis = serde_json::from_str(json)
        .map_err(|e| AnalyzerError::upstream(format!("failed to parse model response: {}", e)))?;

    if analysis.complexity.trim().is_empty() {
        return Err(AnalyzerError::upstream(
            "failed to parse model response: empty complexity",
        ));
    }
    if !(0.0..=100.0).contains(&analysis.confidence) {
        return Err(AnalyzerError::upstream(format!(
            "failed to parse model response: confidence {} outside 0-100",
            analysis.confidence
        )));
    }

    Ok(analysis)
}
