use anyhow::{Context, Result};
use complexity_common::{AnalysisRequest, AnalysisResult};
use serde::Deserialize;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Client for a running complexity analyzer server
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

/// Error body returned by the server
#[derive(Deserialize)]
struct ServerError {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = format!("{}/api/analyze", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("failed to reach server at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServerError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            anyhow::bail!("analysis failed ({}): {}", status, message);
        }

        response
            .json::<AnalysisResult>()
            .await
            .context("server returned an unexpected response body")
    }
}
