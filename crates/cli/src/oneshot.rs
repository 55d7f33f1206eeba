use anyhow::{Context, Result};
use complexity_common::{AnalysisRequest, AnalysisResult, SystemConfig};
use complexity_engine::ComplexityAnalyzer;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api_client::ApiClient;
use crate::display;

/// Options for a single `analyze` invocation
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub file: PathBuf,
    pub language: Option<String>,
    pub server_url: String,
    pub local: bool,
    pub config: PathBuf,
    pub json: bool,
}

pub async fn execute(options: &AnalyzeOptions) -> Result<()> {
    let code = tokio::fs::read_to_string(&options.file)
        .await
        .with_context(|| format!("failed to read {}", options.file.display()))?;

    let language = options
        .language
        .clone()
        .or_else(|| infer_language(&options.file).map(str::to_string))
        .unwrap_or_default();
    debug!(file = %options.file.display(), language = %language, "Analyzing file");

    let request = AnalysisRequest::new(code, language);
    let result = if options.local {
        analyze_locally(&options.config, &request).await?
    } else {
        ApiClient::new(&options.server_url).analyze(&request).await?
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display::print_result(&result);
    }
    Ok(())
}

async fn analyze_locally(config_path: &Path, request: &AnalysisRequest) -> Result<AnalysisResult> {
    let config = SystemConfig::load_config(config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;
    let analyzer = ComplexityAnalyzer::from_config(&config).context("failed to initialize analyzer")?;
    Ok(analyzer.analyze(request).await?)
}

/// Language name for a source file, from its extension
pub fn infer_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match ext.as_str() {
        "go" => "go",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "rs" => "rust",
        "rb" => "ruby",
        "kt" => "kotlin",
        "swift" => "swift",
        "php" => "php",
        "scala" => "scala",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_language_from_extension() {
        assert_eq!(infer_language(Path::new("sort.go")), Some("go"));
        assert_eq!(infer_language(Path::new("dir/algo.PY")), Some("python"));
        assert_eq!(infer_language(Path::new("lib.hpp")), Some("cpp"));
    }

    #[test]
    fn test_infer_language_unknown() {
        assert_eq!(infer_language(Path::new("notes.txt")), None);
        assert_eq!(infer_language(Path::new("Makefile")), None);
    }
}
