//! Terminal rendering of analysis results

use complexity_common::AnalysisResult;
use std::fmt::Write;

/// Render a result the way a person wants to read it.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Complexity:  {}", result.complexity);
    let _ = writeln!(out, "Confidence:  {:.1}%", result.confidence);

    if !result.static_analysis_notes.is_empty() {
        let _ = writeln!(out, "\nStatic analysis:");
        for note in &result.static_analysis_notes {
            let _ = writeln!(out, "  • {}", note);
        }
    }

    let _ = writeln!(out, "\nExecution timings:");
    if result.performance_series.is_empty() {
        let _ = writeln!(out, "  unavailable (the benchmark did not produce data)");
    } else {
        for point in &result.performance_series {
            let _ = writeln!(out, "  n = {}: {:.3} ms", point.input_size, point.elapsed_millis);
        }
    }
    if let Some(skipped) = result.skipped_lines.filter(|&n| n > 0) {
        let _ = writeln!(out, "  ({} unrecognized output lines ignored)", skipped);
    }

    out
}

pub fn print_result(result: &AnalysisResult) {
    print!("{}", render(result));
}
