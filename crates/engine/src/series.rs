//! Parser for the `size,time` lines printed by generated benchmark programs.

use complexity_common::{AnalyzerError, PerformancePoint, PerformanceSeries, Result};
use tracing::debug;

/// Parse captured benchmark output into a performance series.
///
/// Lines are trimmed and blank ones dropped. Every other line must be exactly
/// `<integer>,<float>`; anything else is skipped and only counted. Fails when
/// no line parses, so a series is either populated or rejected as a whole.
pub fn parse_series(output: &str) -> Result<PerformanceSeries> {
    let mut series = PerformanceSeries::default();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_point(line) {
            Some(point) => series.points.push(point),
            None => {
                debug!(line = %line, "Skipping non-sample output line");
                series.skipped_lines += 1;
            }
        }
    }

    if series.is_empty() {
        return Err(AnalyzerError::parse(format!(
            "no performance data parsed ({} lines skipped)",
            series.skipped_lines
        )));
    }

    Ok(series)
}

fn parse_point(line: &str) -> Option<PerformancePoint> {
    let (size, time) = line.split_once(',')?;
    let input_size = size.trim().parse::<u64>().ok()?;
    let elapsed_millis = time.trim().parse::<f64>().ok()?;

    if !elapsed_millis.is_finite() || elapsed_millis < 0.0 {
        return None;
    }

    Some(PerformancePoint::new(input_size, elapsed_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_points_and_discards_noise() {
        let series = parse_series("100,1.5\n200,3.25\nnot-a-line\n\n").unwrap();

        assert_eq!(
            series.points,
            vec![PerformancePoint::new(100, 1.5), PerformancePoint::new(200, 3.25)]
        );
        assert_eq!(series.skipped_lines, 1);
    }

    #[test]
    fn test_preserves_print_order() {
        let series = parse_series("5000,2.0\n1000,0.5\n").unwrap();
        let sizes: Vec<u64> = series.points.iter().map(|p| p.input_size).collect();
        assert_eq!(sizes, vec![5000, 1000]);
    }

    #[test]
    fn test_zero_parseable_lines_is_parse_error() {
        let err = parse_series("# go: downloading\nexit status 1\n\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse(_)));
        assert!(err.to_string().contains("2 lines skipped"));
    }

    #[test]
    fn test_empty_output_is_parse_error() {
        assert!(parse_series("").is_err());
        assert!(parse_series("\n   \n").is_err());
    }

    #[test]
    fn test_rejects_malformed_fields() {
        let output = "1,2,3\n-5,1.0\n10,-1.0\n10,NaN\n10,inf\n1.5,2.0\n,1.0\n10,\n";
        assert!(parse_series(output).is_err());
    }

    #[test]
    fn test_accepts_surrounding_whitespace_and_crlf() {
        let series = parse_series("  1000 , 0.000123 \r\n7,1e-3\r\n").unwrap();
        assert_eq!(series.points[0], PerformancePoint::new(1000, 0.000123));
        assert_eq!(series.points[1], PerformancePoint::new(7, 0.001));
        assert_eq!(series.skipped_lines, 0);
    }
}
